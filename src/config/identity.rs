//! Identity provider configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Identity provider configuration (GoTrue-compatible auth server)
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Auth server base URL, also the expected JWT issuer
    pub authority: String,

    /// Expected audience claim in access tokens
    pub audience: String,

    /// Public API key sent with token-endpoint requests
    pub api_key: SecretString,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl IdentityConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate identity configuration
    ///
    /// In production, requires HTTPS for the authority URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.authority.is_empty() {
            return Err(ValidationError::MissingRequired("IDENTITY_AUTHORITY"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("IDENTITY_AUDIENCE"));
        }

        if *environment == Environment::Production && !self.authority.starts_with("https://") {
            return Err(ValidationError::AuthorityMustBeHttps);
        }

        Ok(())
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(authority: &str) -> IdentityConfig {
        IdentityConfig {
            authority: authority.to_string(),
            audience: "chainsight-web".to_string(),
            api_key: SecretString::new("anon-key".to_string()),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }

    #[test]
    fn jwks_ttl_converts_to_duration() {
        let mut cfg = config("https://auth.example.com");
        cfg.jwks_cache_ttl_secs = 120;
        assert_eq!(cfg.jwks_cache_ttl(), Duration::from_secs(120));
    }

    #[test]
    fn empty_authority_is_rejected() {
        assert!(config("").validate(&Environment::Development).is_err());
    }

    #[test]
    fn production_requires_https() {
        let cfg = config("http://auth.example.com");
        assert!(cfg.validate(&Environment::Development).is_ok());
        assert!(matches!(
            cfg.validate(&Environment::Production),
            Err(ValidationError::AuthorityMustBeHttps)
        ));
    }

    #[test]
    fn https_authority_passes_production() {
        assert!(config("https://auth.example.com")
            .validate(&Environment::Production)
            .is_ok());
    }
}
