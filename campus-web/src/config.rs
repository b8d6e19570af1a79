use std::env;
use std::str::FromStr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

/// Process settings, read from the environment after `.env` has been loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Settings {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            token_ttl_hours: parsed(&lookup, "TOKEN_TTL_HOURS")?.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: parsed(&lookup, "BCRYPT_COST")?.unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_fill_optional_values() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/campus"), ("JWT_SECRET", "s")])
            .unwrap();
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(s.token_ttl_hours, DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(s.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let err = settings(&[("DATABASE_URL", "postgres://localhost/campus")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let err = settings(&[
            ("DATABASE_URL", "postgres://localhost/campus"),
            ("JWT_SECRET", "s"),
            ("TOKEN_TTL_HOURS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("TOKEN_TTL_HOURS", _)));
    }
}
