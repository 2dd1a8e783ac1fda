//! HTTP server command
//!
//! Runs the contactd HTTP server in the selected deployment mode.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use contactd_server::db::{Connector, MemoryConnector, PgConnector};
use contactd_server::{serve, DeploymentMode, ServerConfig};

/// Deployment mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Connect at startup and exit if the datastore is unreachable
    AlwaysOn,
    /// Connect on the first request and report failures per request
    PerInvocation,
}

impl From<ModeArg> for DeploymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::AlwaysOn => DeploymentMode::AlwaysOn,
            ModeArg::PerInvocation => DeploymentMode::PerInvocation,
        }
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides HOST, default: 0.0.0.0)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides PORT, default: 5000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Deployment mode (overrides CONTACTD_MODE)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Keep messages in memory instead of a database (lost on exit; takes
    /// precedence over --database-url)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    /// Environment configuration with command-line overrides applied
    pub fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();

        if let Some(host) = self.host {
            config.bind_addr.set_ip(host);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if self.memory {
            config.database_url = Some("memory://local".to_owned());
        } else if self.database_url.is_some() {
            config.database_url = self.database_url;
        }

        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let connector: Arc<dyn Connector> = if args.memory {
        tracing::warn!("Using in-memory store - messages are lost on exit");
        Arc::new(MemoryConnector::new())
    } else {
        Arc::new(PgConnector)
    };
    let config = args.into_config();

    tracing::info!(mode = %config.mode, "Starting contactd server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    serve(config, connector).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn flags_override_config() {
        let cli = TestCli::parse_from([
            "contactd",
            "--host",
            "127.0.0.1",
            "--port",
            "8081",
            "--mode",
            "per-invocation",
            "--memory",
        ]);
        let config = cli.serve.into_config();

        assert_eq!(config.bind_addr, "127.0.0.1:8081".parse().unwrap());
        assert_eq!(config.mode, DeploymentMode::PerInvocation);
        assert_eq!(config.database_url.as_deref(), Some("memory://local"));
    }

    #[test]
    fn memory_wins_over_database_url() {
        let cli = TestCli::parse_from([
            "contactd",
            "--memory",
            "--database-url",
            "postgres://localhost/contacts",
        ]);
        let config = cli.serve.into_config();
        assert_eq!(config.database_url.as_deref(), Some("memory://local"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(TestCli::try_parse_from(["contactd", "--mode", "sometimes"]).is_err());
    }
}
