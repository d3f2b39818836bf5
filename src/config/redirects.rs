//! Redirect destination configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::redirect::RedirectPaths;

/// Redirect destinations for the auth callback
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectConfig {
    /// Where confirmed administrators land
    #[serde(default = "default_admin_home")]
    pub admin_home: String,

    /// Default post-login path when the callback carries no usable `next`
    #[serde(default = "default_next")]
    pub default_next: String,
}

impl RedirectConfig {
    /// Convert into the domain-level path pair
    pub fn paths(&self) -> RedirectPaths {
        RedirectPaths {
            admin_home: self.admin_home.clone(),
            default_next: self.default_next.clone(),
        }
    }

    /// Validate redirect configuration - both targets must be site-relative
    pub fn validate(&self) -> Result<(), ValidationError> {
        for path in [&self.admin_home, &self.default_next] {
            if !path.starts_with('/') || path.starts_with("//") {
                return Err(ValidationError::InvalidRedirectPath);
            }
        }
        Ok(())
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            admin_home: default_admin_home(),
            default_next: default_next(),
        }
    }
}

fn default_admin_home() -> String {
    "/admin".to_string()
}

fn default_next() -> String {
    "/dashboard".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_layout() {
        let cfg = RedirectConfig::default();
        assert_eq!(cfg.admin_home, "/admin");
        assert_eq!(cfg.default_next, "/dashboard");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn paths_converts_to_domain_pair() {
        let paths = RedirectConfig::default().paths();
        assert_eq!(paths.admin_home, "/admin");
        assert_eq!(paths.default_next, "/dashboard");
    }

    #[test]
    fn absolute_targets_are_rejected() {
        let cfg = RedirectConfig {
            admin_home: "https://elsewhere.example.com/admin".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
