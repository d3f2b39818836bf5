//! HTTP implementation of the role lookup port.
//!
//! One GET against the role backend per call:
//!
//! ```text
//! GET {base}/api/admin/check-user-role?user_id={id}
//! Accept: application/json
//! Cache-Control: no-store
//! ```
//!
//! The answer must reflect live role state, so caching is disabled and the
//! request carries a bounded timeout. The body is validated against an
//! explicit schema; anything that is not a strict `"is_admin": true` inside
//! a 2xx response reads as "not admin".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde::Deserialize;

use crate::domain::foundation::UserId;
use crate::ports::{RoleLookup, RoleLookupError};

const CHECK_ROLE_PATH: &str = "/api/admin/check-user-role";

/// Expected shape of the backend's answer.
///
/// The backend sends more fields (`role`, `redirect`, `display_name`); only
/// the flag matters here, and a missing flag defaults to `false`.
#[derive(Debug, Deserialize)]
struct RoleCheckPayload {
    #[serde(default)]
    is_admin: bool,
}

/// Parses a response body into the admin flag.
///
/// A body that is not valid JSON, or whose `is_admin` is not a boolean, is
/// a parse failure - never a panic, never `true`.
fn admin_flag_from_body(body: &str) -> Result<bool, serde_json::Error> {
    serde_json::from_str::<RoleCheckPayload>(body).map(|payload| payload.is_admin)
}

/// Role lookup over HTTP.
pub struct HttpRoleLookup {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpRoleLookup {
    /// Creates a lookup client against the given backend base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let base = base_url.into();
        let endpoint = format!("{}{}", base.trim_end_matches('/'), CHECK_ROLE_PATH);
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, http })
    }

    /// The fully resolved endpoint URL (without the query string).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RoleLookup for HttpRoleLookup {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, RoleLookupError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("user_id", user_id.as_str())])
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| RoleLookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoleLookupError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoleLookupError::Network(e.to_string()))?;

        let is_admin =
            admin_flag_from_body(&body).map_err(|e| RoleLookupError::Malformed(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, status = %status, is_admin, "role lookup answered");
        Ok(is_admin)
    }
}

impl std::fmt::Debug for HttpRoleLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoleLookup")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lookup(base: &str) -> HttpRoleLookup {
        HttpRoleLookup::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        assert_eq!(
            lookup("http://127.0.0.1:8000").endpoint(),
            "http://127.0.0.1:8000/api/admin/check-user-role"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            lookup("http://127.0.0.1:8000/").endpoint(),
            "http://127.0.0.1:8000/api/admin/check-user-role"
        );
    }

    #[test]
    fn strict_true_reads_as_admin() {
        assert!(admin_flag_from_body(r#"{"is_admin": true}"#).unwrap());
    }

    #[test]
    fn false_and_missing_flags_read_as_non_admin() {
        assert!(!admin_flag_from_body(r#"{"is_admin": false}"#).unwrap());
        assert!(!admin_flag_from_body(r#"{"role": "admin"}"#).unwrap());
        assert!(!admin_flag_from_body("{}").unwrap());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let body = r#"{"role":"admin","is_admin":true,"redirect":"/admin","display_name":"A"}"#;
        assert!(admin_flag_from_body(body).unwrap());
    }

    #[test]
    fn non_boolean_flag_is_a_parse_failure() {
        assert!(admin_flag_from_body(r#"{"is_admin": "true"}"#).is_err());
        assert!(admin_flag_from_body(r#"{"is_admin": 1}"#).is_err());
    }

    #[test]
    fn non_json_body_is_a_parse_failure() {
        assert!(admin_flag_from_body("<html>backend down</html>").is_err());
        assert!(admin_flag_from_body("").is_err());
    }

    proptest! {
        /// Arbitrary bodies never panic, and only a strict boolean `true`
        /// in `is_admin` ever grants the flag.
        #[test]
        fn arbitrary_bodies_never_grant_admin_spuriously(body in ".{0,256}") {
            if let Ok(true) = admin_flag_from_body(&body) {
                let value: serde_json::Value = serde_json::from_str(&body).unwrap();
                prop_assert_eq!(value.get("is_admin"), Some(&serde_json::Value::Bool(true)));
            }
        }
    }
}
