//! GoTrue-style identity provider adapter.
//!
//! Implements both identity ports against a hosted GoTrue-compatible auth
//! server (the provider the platform frontend authenticates with):
//!
//! - `SessionExchanger`: `POST {issuer}/token?grant_type=authorization_code`
//!   turns the callback's one-time code into an access token.
//! - `CurrentUserAccessor`: the access token is a JWT; it is validated
//!   locally against the provider's JWKS (issuer, audience, expiry) and its
//!   claims become the authenticated identity. Any validation failure is an
//!   anonymous visitor, not an error.
//!
//! Key material is cached with a TTL so the hot path does not refetch JWKS
//! on every callback.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::redirect::safe_next_path;
use crate::ports::{CallbackParams, CurrentUserAccessor, EstablishedSession, SessionExchanger};

/// Configuration for the GoTrue adapter.
#[derive(Debug, Clone)]
pub struct GoTrueConfig {
    /// Base URL of the auth server (e.g. "https://auth.chainsight.app").
    pub issuer_url: String,

    /// Expected audience claim in access tokens.
    pub audience: String,

    /// Public API key sent with token-endpoint requests.
    pub api_key: SecretString,

    /// How long fetched JWKS stay valid before a refetch.
    pub jwks_cache_ttl: Duration,
}

impl GoTrueConfig {
    pub fn new(
        issuer_url: impl Into<String>,
        audience: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            api_key,
            jwks_cache_ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_jwks_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    fn base(&self) -> &str {
        self.issuer_url.trim_end_matches('/')
    }

    fn token_url(&self) -> String {
        format!("{}/token", self.base())
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.base())
    }
}

/// Token-endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: Option<String>,
    #[allow(dead_code)]
    expires_in: Option<u64>,
}

/// Claims carried by a GoTrue access token.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

fn user_from_claims(claims: AccessClaims) -> Option<AuthenticatedUser> {
    let id = match UserId::new(&claims.sub) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("access token carries an empty subject");
            return None;
        }
    };
    let display_name = claims.user_metadata.and_then(|m| m.full_name);
    Some(AuthenticatedUser::new(id, claims.email, display_name))
}

/// Production identity provider adapter.
pub struct GoTrueIdentityProvider {
    config: GoTrueConfig,
    http: reqwest::Client,
    keys: RwLock<Option<(JwkSet, Instant)>>,
}

impl GoTrueIdentityProvider {
    /// Creates the adapter. JWKS are fetched lazily on first use so startup
    /// does not depend on the provider being reachable.
    pub fn new(config: GoTrueConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("HTTP client construction cannot fail with static options");

        Self {
            config,
            http,
            keys: RwLock::new(None),
        }
    }

    async fn fetch_keys(&self) -> Option<JwkSet> {
        let url = self.config.jwks_url();
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch JWKS");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "JWKS endpoint returned non-success");
            return None;
        }
        match response.json::<JwkSet>().await {
            Ok(jwks) => {
                tracing::debug!(keys = jwks.keys.len(), "fetched JWKS");
                Some(jwks)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse JWKS");
                None
            }
        }
    }

    /// Cached JWKS, refetched once the TTL lapses.
    async fn current_keys(&self) -> Option<JwkSet> {
        {
            let cached = self.keys.read().await;
            if let Some((jwks, fetched_at)) = cached.as_ref() {
                if fetched_at.elapsed() <= self.config.jwks_cache_ttl {
                    return Some(jwks.clone());
                }
            }
        }

        let jwks = self.fetch_keys().await?;
        *self.keys.write().await = Some((jwks.clone(), Instant::now()));
        Some(jwks)
    }

    fn decoding_key_for(&self, token: &str, jwks: &JwkSet) -> Option<(DecodingKey, Algorithm)> {
        let header = match decode_header(token) {
            Ok(h) => h,
            Err(e) => {
                tracing::debug!(error = %e, "access token header undecodable");
                return None;
            }
        };
        let kid = header.kid?;
        let jwk = jwks.find(&kid)?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) | None => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(other) => {
                tracing::warn!(algorithm = ?other, "unsupported JWKS key algorithm");
                return None;
            }
        };

        let key = match DecodingKey::from_jwk(jwk) {
            Ok(k) => k,
            Err(e) => {
                tracing::warn!(error = %e, "JWKS key unusable");
                return None;
            }
        };
        Some((key, algorithm))
    }
}

#[async_trait]
impl SessionExchanger for GoTrueIdentityProvider {
    async fn exchange(
        &self,
        callback: &CallbackParams,
        fallback_next: &str,
    ) -> Result<EstablishedSession, AuthError> {
        let response = self
            .http
            .post(self.config.token_url())
            .query(&[("grant_type", "authorization_code")])
            .header("apikey", self.config.api_key.expose_secret())
            .json(&serde_json::json!({ "auth_code": callback.code }))
            .send()
            .await
            .map_err(|e| AuthError::provider_unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            tracing::info!(status = %status, "identity provider rejected auth code");
            return Err(AuthError::CodeRejected);
        }
        if !status.is_success() {
            return Err(AuthError::provider_unavailable(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        Ok(EstablishedSession {
            access_token: SecretString::new(token.access_token),
            next_path: safe_next_path(callback.next.as_deref(), fallback_next),
        })
    }
}

#[async_trait]
impl CurrentUserAccessor for GoTrueIdentityProvider {
    async fn current_user(&self, session: &EstablishedSession) -> Option<AuthenticatedUser> {
        let token = session.access_token.expose_secret();
        let jwks = self.current_keys().await?;
        let (key, algorithm) = self.decoding_key_for(token, &jwks)?;

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        match decode::<AccessClaims>(token, &key, &validation) {
            Ok(data) => user_from_claims(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "access token failed validation");
                None
            }
        }
    }
}

impl std::fmt::Debug for GoTrueIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueIdentityProvider")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoTrueConfig {
        GoTrueConfig::new(
            "https://auth.chainsight.app",
            "chainsight-web",
            SecretString::new("anon-key".to_string()),
        )
    }

    #[test]
    fn token_url_appends_token_path() {
        assert_eq!(config().token_url(), "https://auth.chainsight.app/token");
    }

    #[test]
    fn jwks_url_handles_trailing_slash() {
        let cfg = GoTrueConfig::new(
            "https://auth.chainsight.app/",
            "chainsight-web",
            SecretString::new("anon-key".to_string()),
        );
        assert_eq!(
            cfg.jwks_url(),
            "https://auth.chainsight.app/.well-known/jwks.json"
        );
    }

    #[test]
    fn jwks_ttl_defaults_to_an_hour() {
        assert_eq!(config().jwks_cache_ttl, Duration::from_secs(3600));
        let cfg = config().with_jwks_cache_ttl(Duration::from_secs(60));
        assert_eq!(cfg.jwks_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn claims_map_to_identity() {
        let user = user_from_claims(AccessClaims {
            sub: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            email: Some("u@example.com".to_string()),
            user_metadata: Some(UserMetadata {
                full_name: Some("U Example".to_string()),
            }),
        })
        .unwrap();
        assert_eq!(user.id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(user.email.as_deref(), Some("u@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("U Example"));
    }

    #[test]
    fn empty_subject_folds_to_anonymous() {
        let user = user_from_claims(AccessClaims {
            sub: String::new(),
            email: None,
            user_metadata: None,
        });
        assert!(user.is_none());
    }

    #[test]
    fn adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoTrueIdentityProvider>();
    }
}
