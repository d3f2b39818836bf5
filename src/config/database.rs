//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Database configuration (PostgreSQL connection)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum pool connections kept warm
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }

    #[test]
    fn postgres_urls_are_valid() {
        assert!(config("postgres://u@localhost/db").validate().is_ok());
        assert!(config("postgresql://u@localhost/db").validate().is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(config("mysql://u@localhost/db").validate().is_err());
    }

    #[test]
    fn inverted_pool_bounds_are_rejected() {
        let mut cfg = config("postgres://u@localhost/db");
        cfg.min_connections = 20;
        cfg.max_connections = 5;
        assert!(matches!(cfg.validate(), Err(ValidationError::InvalidPoolSize)));
    }

    #[test]
    fn oversized_pool_is_rejected() {
        let mut cfg = config("postgres://u@localhost/db");
        cfg.max_connections = 500;
        assert!(matches!(cfg.validate(), Err(ValidationError::PoolSizeTooLarge)));
    }
}
