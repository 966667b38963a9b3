use serde::Deserialize;
use thiserror::Error;

/// Minimum accepted length for the JWT signing secret
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing or invalid environment variable: {0}")]
    Env(#[from] envy::Error),
    #[error("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long")]
    WeakJwtSecret,
}

/// Server configuration, read from environment variables
///
/// Variable names are the upper-case field names (`DATABASE_URL`,
/// `JWT_SECRET`, ...). The environment is selected with `APP_ENV`.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default, rename = "app_env")]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

const fn default_jwt_expiry_hours() -> i64 {
    24
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

const fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build from arbitrary key/value pairs, used by `from_env` and tests
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(vars)?;
        if config.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret);
        }
        Ok(config)
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    #[test]
    fn test_defaults_applied() {
        let config = ApiConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/mentora"),
            ("JWT_SECRET", SECRET),
        ]))
        .expect("config should load");

        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.jwt_expiry_hours, 24);
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.parsed_allowed_origins(), vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_overrides_and_origin_list() {
        let config = ApiConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/mentora"),
            ("JWT_SECRET", SECRET),
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "https://mentora.app, https://admin.mentora.app,"),
        ]))
        .expect("config should load");

        assert!(config.env.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["https://mentora.app", "https://admin.mentora.app"]
        );
    }

    #[test]
    fn test_missing_database_url() {
        let result = ApiConfig::from_vars(vars(&[("JWT_SECRET", SECRET)]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let result = ApiConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/mentora"),
            ("JWT_SECRET", "short"),
        ]));
        assert!(matches!(result, Err(ConfigError::WeakJwtSecret)));
    }
}
