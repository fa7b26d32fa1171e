use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::workflows::credit::RulebookConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub credit: CreditConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let dataset_path = env::var("CREDIT_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CreditConfig::DEFAULT_DATASET_PATH));
        let rulebook_path = env::var("CREDIT_RULEBOOK_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let rulebook = match &rulebook_path {
            Some(path) => load_rulebook(path)?,
            None => RulebookConfig::standard(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            credit: CreditConfig {
                dataset_path,
                rulebook_path,
                rulebook,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Data source and policy thresholds for the decision engine.
#[derive(Debug, Clone)]
pub struct CreditConfig {
    pub dataset_path: PathBuf,
    pub rulebook_path: Option<PathBuf>,
    pub rulebook: RulebookConfig,
}

impl CreditConfig {
    pub const DEFAULT_DATASET_PATH: &'static str = "qawaem_data.json";
}

pub fn load_rulebook(path: &Path) -> Result<RulebookConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::RulebookIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::RulebookFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    RulebookIo {
        path: PathBuf,
        source: std::io::Error,
    },
    RulebookFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::RulebookIo { path, .. } => {
                write!(f, "CREDIT_RULEBOOK_PATH {} could not be read", path.display())
            }
            ConfigError::RulebookFormat { path, source } => write!(
                f,
                "CREDIT_RULEBOOK_PATH {} is not a complete rulebook: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RulebookIo { source, .. } => Some(source),
            ConfigError::RulebookFormat { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("CREDIT_DATASET_PATH");
        env::remove_var("CREDIT_RULEBOOK_PATH");
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("lendo-credit-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("temp file written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.credit.dataset_path, PathBuf::from("qawaem_data.json"));
        assert_eq!(config.credit.rulebook, RulebookConfig::standard());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "http");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn loads_rulebook_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let mut custom = RulebookConfig::standard();
        custom.version = "committee-override".to_string();
        custom.minimum_dscr = 1.25;
        let path = temp_file(
            "rulebook.json",
            &serde_json::to_string(&custom).expect("serializes"),
        );
        env::set_var("CREDIT_RULEBOOK_PATH", &path);

        let config = AppConfig::load().expect("override loads");
        assert_eq!(config.credit.rulebook, custom);
        assert_eq!(config.credit.rulebook_path, Some(path.clone()));

        std::fs::remove_file(path).ok();
        reset_env();
    }

    #[test]
    fn incomplete_rulebook_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = temp_file("partial-rulebook.json", r#"{ "version": "partial" }"#);
        env::set_var("CREDIT_RULEBOOK_PATH", &path);

        let err = AppConfig::load().expect_err("partial rulebook rejected");
        assert!(matches!(err, ConfigError::RulebookFormat { .. }));

        std::fs::remove_file(path).ok();
        reset_env();
    }
}
