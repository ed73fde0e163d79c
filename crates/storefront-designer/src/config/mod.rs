//! Runtime settings for the design manager service, read from `APP_*`
//! variables after an optional `.env` file.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage. Unrecognised values run as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub fixtures: FixtureConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = optional_var("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or(AppEnvironment::Development);

        let port = match optional_var("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };
        let server = ServerConfig {
            host: optional_var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };

        let telemetry = TelemetryConfig {
            log_level: optional_var("APP_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        let fixtures = FixtureConfig {
            seed_file: optional_var("APP_SEED_FILE")
                .map(|raw| seed_path(&raw))
                .transpose()?,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            fixtures,
        })
    }
}

/// Unset and blank variables are treated alike.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|raw| !raw.trim().is_empty())
}

fn seed_path(raw: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(raw.trim());
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::MissingSeedFile { path })
    }
}

/// Where the design API listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` binds the IPv4 loopback; anything else must be a literal
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Default `tracing` level when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional JSON file of stored designs and profiles the in-memory adapters
/// start from.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingSeedFile { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must be `localhost` or an IPv4/IPv6 address")
            }
            ConfigError::MissingSeedFile { path } => {
                write!(f, "APP_SEED_FILE {} is not a readable file", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::MissingSeedFile { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
