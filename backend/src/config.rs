//! Process configuration.
//!
//! Listener and store selection come from plain environment variables read
//! through [`mockable::Env`] so they can be tested without touching the
//! process environment. Sample-data toggles are layered through OrthoConfig.

use std::net::{IpAddr, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::outbound::persistence::PoolConfig;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const PORT_ENV: &str = "PORT";
const HOST_ENV: &str = "HOST";
const USER_STORE_ENV: &str = "USER_STORE";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const STORE_EXPECTED: &str = "postgres|memory";

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local collection; data is lost on restart.
    Memory,
}

/// Errors raised while reading service configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Listener address and store selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub backend: StorageBackend,
    /// Connection string; `None` when unset or blank.
    pub database_url: Option<String>,
}

impl ServiceConfig {
    /// Read configuration from `env`.
    ///
    /// `DATABASE_URL` is optional here; callers decide whether its absence
    /// is fatal (see [`ServiceConfig::require_database_url`]).
    ///
    /// # Examples
    /// ```
    /// use mockable::MockEnv;
    /// use user_service::config::{ServiceConfig, StorageBackend};
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("9000".to_owned()),
    ///     "USER_STORE" => Some("memory".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = ServiceConfig::from_env(&env).expect("valid config");
    /// assert_eq!(config.bind_addr.port(), 9000);
    /// assert_eq!(config.backend, StorageBackend::Memory);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let port = port_from_env(env)?;
        let host = host_from_env(env)?;
        let backend = backend_from_env(env)?;
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            backend,
            database_url,
        })
    }

    /// Pool configuration for the connection string, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(PoolConfig::new)
    }

    /// Return the connection string or a [`ConfigError::MissingEnv`].
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingEnv {
                name: DATABASE_URL_ENV,
            })
    }
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, ConfigError> {
    match env.string(PORT_ENV).filter(|value| !value.is_empty()) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: PORT_ENV,
            value,
            expected: "a TCP port number",
        }),
        None => Ok(DEFAULT_PORT),
    }
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, ConfigError> {
    let value = env
        .string(HOST_ENV)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_owned());
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name: HOST_ENV,
        value,
        expected: "an IP address",
    })
}

fn backend_from_env<E: Env>(env: &E) -> Result<StorageBackend, ConfigError> {
    let Some(value) = env.string(USER_STORE_ENV) else {
        return Ok(StorageBackend::Postgres);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
        "memory" | "in-memory" => Ok(StorageBackend::Memory),
        _ => {
            warn!(value = %value, "unrecognised USER_STORE");
            Err(ConfigError::InvalidEnv {
                name: USER_STORE_ENV,
                value,
                expected: STORE_EXPECTED,
            })
        }
    }
}

/// Sample-data seeding toggle loaded via OrthoConfig (`SAMPLE_DATA_*`).
///
/// Seeding is on unless `SAMPLE_DATA_ENABLED` says otherwise.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SAMPLE_DATA")]
pub struct SampleDataSettings {
    /// Seed the sample users into an empty store.
    pub enabled: Option<bool>,
}

impl SampleDataSettings {
    /// Whether sample users should be seeded; defaults to `true`.
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Load from the process environment, falling back to enabled when the
    /// configuration cannot be read.
    pub fn load_or_default() -> Self {
        match Self::load_from_iter([std::ffi::OsString::from("user-service")]) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(%error, "failed to load sample data settings; seeding enabled");
                Self { enabled: None }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use std::collections::HashMap;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let config = ServiceConfig::from_env(&mock_env(&[])).expect("config");

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.backend, StorageBackend::Postgres);
        assert_eq!(config.database_url, None);
        assert!(config.pool_config().is_none());
        assert_eq!(
            config.require_database_url(),
            Err(ConfigError::MissingEnv { name: "DATABASE_URL" })
        );
    }

    #[rstest]
    fn explicit_values_are_used() {
        let env = mock_env(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("USER_STORE", "Memory"),
            ("DATABASE_URL", "postgres://localhost/users"),
        ]);

        let config = ServiceConfig::from_env(&env).expect("config");

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().expect("addr"));
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(
            config.require_database_url(),
            Ok("postgres://localhost/users")
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_database_url_counts_as_missing(#[case] value: &str) {
        let config =
            ServiceConfig::from_env(&mock_env(&[("DATABASE_URL", value)])).expect("config");

        assert_eq!(config.database_url, None);
    }

    #[rstest]
    #[case("PORT", "http", "PORT")]
    #[case("PORT", "70000", "PORT")]
    #[case("HOST", "localhost:80", "HOST")]
    #[case("USER_STORE", "redis", "USER_STORE")]
    fn invalid_values_are_reported(
        #[case] key: &str,
        #[case] value: &str,
        #[case] expected_name: &str,
    ) {
        let err = ServiceConfig::from_env(&mock_env(&[(key, value)])).expect_err("invalid");

        match err {
            ConfigError::InvalidEnv { name, value: got, .. } => {
                assert_eq!(name, expected_name);
                assert_eq!(got, value);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn sample_data_defaults_to_enabled() {
        let _guard = lock_env([("SAMPLE_DATA_ENABLED", None::<String>)]);

        let settings = SampleDataSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load");

        assert_eq!(settings.enabled, None);
        assert!(settings.enabled());
    }

    #[rstest]
    fn load_or_default_seeds_when_unset() {
        let _guard = lock_env([("SAMPLE_DATA_ENABLED", None::<String>)]);

        assert!(SampleDataSettings::load_or_default().enabled());
    }

    #[rstest]
    #[case("false", false)]
    #[case("true", true)]
    fn sample_data_follows_environment(#[case] value: &str, #[case] expected: bool) {
        let _guard = lock_env([("SAMPLE_DATA_ENABLED", Some(value.to_owned()))]);

        let settings = SampleDataSettings::load_or_default();

        assert_eq!(settings.enabled(), expected);
    }
}
