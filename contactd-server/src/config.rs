//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: datastore connection string
//! - `CONTACTD_MODE`: `always-on` (default) or `per-invocation`
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:5000)
//! - `CORS_ALLOWED_ORIGINS`: comma-separated origin allow-list
//! - `DB_SERVER_SELECTION_TIMEOUT_MS`, `DB_SOCKET_TIMEOUT_MS`, `DB_MAX_CONNECTIONS`

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::db::ConnectOptions;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Origins allowed to call the API from a browser
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "https://smart-scheduler-client.vercel.app",
];

/// How the process is deployed, which decides the startup failure policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    /// Long-running server: connect at startup, exit if that fails
    #[default]
    AlwaysOn,
    /// Cold-started per request: connect lazily, report failures per request
    PerInvocation,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlwaysOn => "always-on",
            Self::PerInvocation => "per-invocation",
        }
    }

    /// Whether a datastore failure at startup should stop the process
    pub fn startup_failure_is_fatal(&self) -> bool {
        matches!(self, Self::AlwaysOn)
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always-on" | "always_on" | "server" => Ok(Self::AlwaysOn),
            "per-invocation" | "per_invocation" | "serverless" => Ok(Self::PerInvocation),
            other => Err(format!(
                "unknown deployment mode '{}' (expected always-on or per-invocation)",
                other
            )),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    pub mode: DeploymentMode,

    /// Datastore connection string; connecting fails without it
    pub database_url: Option<String>,

    pub connect: ConnectOptions,

    /// Origins that receive CORS headers
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            mode: DeploymentMode::default(),
            database_url: None,
            connect: ConnectOptions::default(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL");

        let mode = get("CONTACTD_MODE")
            .and_then(|v| {
                v.parse()
                    .map_err(|e: String| tracing::warn!("{}; using {}", e, defaults.mode))
                    .ok()
            })
            .unwrap_or(defaults.mode);

        let host = get("HOST")
            .and_then(|v| parse_or_warn::<IpAddr>("HOST", &v))
            .unwrap_or(defaults.bind_addr.ip());
        let port = get("PORT")
            .and_then(|v| parse_or_warn::<u16>("PORT", &v))
            .unwrap_or(DEFAULT_PORT);

        let connect = ConnectOptions {
            server_selection_timeout: get("DB_SERVER_SELECTION_TIMEOUT_MS")
                .and_then(|v| parse_or_warn::<u64>("DB_SERVER_SELECTION_TIMEOUT_MS", &v))
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect.server_selection_timeout),
            socket_timeout: get("DB_SOCKET_TIMEOUT_MS")
                .and_then(|v| parse_or_warn::<u64>("DB_SOCKET_TIMEOUT_MS", &v))
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect.socket_timeout),
            max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|v| parse_or_warn::<u32>("DB_MAX_CONNECTIONS", &v))
                .unwrap_or(defaults.connect.max_connections),
        };

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind_addr: SocketAddr::new(host, port),
            mode,
            database_url,
            connect,
            allowed_origins,
        }
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value, "invalid value, using default");
            None
        }
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.mode, DeploymentMode::AlwaysOn);
        assert!(config.database_url.is_none());
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.connect, ConnectOptions::default());
    }

    #[test]
    fn reads_environment() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("CONTACTD_MODE", "per-invocation"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example/ ,"),
            ("DB_SERVER_SELECTION_TIMEOUT_MS", "1500"),
            ("DB_SOCKET_TIMEOUT_MS", "30000"),
        ]);

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.mode, DeploymentMode::PerInvocation);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/contacts")
        );
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.connect.server_selection_timeout,
            Duration::from_millis(1500)
        );
        assert_eq!(config.connect.socket_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("CONTACTD_MODE", "sometimes"),
            ("DB_MAX_CONNECTIONS", "-3"),
            ("DATABASE_URL", "   "),
        ]);

        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(config.mode, DeploymentMode::AlwaysOn);
        assert_eq!(config.connect.max_connections, 5);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("serverless".parse::<DeploymentMode>(), Ok(DeploymentMode::PerInvocation));
        assert_eq!("Always-On".parse::<DeploymentMode>(), Ok(DeploymentMode::AlwaysOn));
        assert!("nope".parse::<DeploymentMode>().is_err());
        assert!(DeploymentMode::AlwaysOn.startup_failure_is_fatal());
        assert!(!DeploymentMode::PerInvocation.startup_failure_is_fatal());
    }
}
