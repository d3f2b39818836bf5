//! Role backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Role backend configuration (check-user-role endpoint)
///
/// `base_url` defaults to the local loopback address the analytics backend
/// listens on during development; deployments override it through
/// `CHAINSIGHT__ROLE_API__BASE_URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleApiConfig {
    /// Base URL of the role backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds for role lookups
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl RoleApiConfig {
    /// Get the lookup timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate role backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidRoleApiUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RoleApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout() -> u64 {
    5
}
