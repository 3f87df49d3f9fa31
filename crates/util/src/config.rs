use std::{env, net::SocketAddr, str::FromStr};

use thiserror::Error;

/// Listen address when `APP_BIND_ADDR` is unset: every interface, port 5001.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

/// Deployment flavour the catalog service runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidEnvironment(value.to_string())),
        }
    }
}

impl Environment {
    /// Production switches log output to JSON lines.
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
}

impl AppConfig {
    /// Reads `APP_ENV` and `APP_BIND_ADDR`, applying defaults for whichever is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };
        let bind_addr = env::var("APP_BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(ConfigError::BindAddress)?;

        Ok(Self {
            bind_addr,
            environment,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_ENV must be one of 'development', 'production', or 'test' (got {0})")]
    InvalidEnvironment(String),
    #[error("invalid APP_BIND_ADDR value: {0}")]
    BindAddress(std::net::AddrParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENV_GUARD;

    #[test]
    fn loads_defaults_in_development() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        env::remove_var("APP_ENV");
        env::remove_var("APP_BIND_ADDR");

        let config = AppConfig::from_env().expect("config should load with defaults");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.bind_addr.port(), 5001);
    }

    #[test]
    fn rejects_invalid_environment() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        env::set_var("APP_ENV", "staging");

        let err = AppConfig::from_env().expect_err("invalid env should error");
        assert!(matches!(err, ConfigError::InvalidEnvironment(value) if value == "staging"));

        env::remove_var("APP_ENV");
    }

    #[test]
    fn rejects_invalid_bind_address() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        env::remove_var("APP_ENV");
        env::set_var("APP_BIND_ADDR", "not-an-address");

        let err = AppConfig::from_env().expect_err("bad address should error");
        assert!(matches!(err, ConfigError::BindAddress(_)));

        env::remove_var("APP_BIND_ADDR");
    }

    #[test]
    fn rejects_address_without_port() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        env::remove_var("APP_ENV");
        env::set_var("APP_BIND_ADDR", "localhost");

        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::BindAddress(_))
        ));

        env::remove_var("APP_BIND_ADDR");
    }

    #[test]
    fn parses_production_environment() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        env::set_var("APP_ENV", "PROD");
        env::set_var("APP_BIND_ADDR", "127.0.0.1:8081");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Production);
        assert!(config.environment.is_production());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8081");

        env::remove_var("APP_ENV");
        env::remove_var("APP_BIND_ADDR");
    }

    #[test]
    fn environment_names_round_trip() {
        for env in [
            Environment::Development,
            Environment::Production,
            Environment::Test,
        ] {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), env);
        }
    }
}
