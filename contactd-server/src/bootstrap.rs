//! Startup policy per deployment mode
//!
//! - AlwaysOn: connect before serving; a failure is returned to the caller,
//!   which exits the process
//! - PerInvocation: defer connecting to the first request; failures become
//!   500 responses for that request only

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{ConnectionManager, Connector};
use crate::error::DbResult;
use crate::state::AppState;

/// Build application state for `config`, connecting eagerly when the
/// deployment mode requires it.
///
/// # Errors
///
/// In AlwaysOn mode, returns the configuration or connection error from the
/// startup connect. PerInvocation mode never fails here.
pub async fn bootstrap(config: &ServerConfig, connector: Arc<dyn Connector>) -> DbResult<AppState> {
    tracing::info!(mode = %config.mode, "initializing application");
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL is not defined in environment variables");
    }

    let connections = ConnectionManager::new(
        config.database_url.clone(),
        config.connect.clone(),
        connector,
    );

    if config.mode.startup_failure_is_fatal() {
        connections.connect().await?;
    } else {
        tracing::info!("datastore connection deferred to first request");
    }

    tracing::info!("application initialized");
    Ok(AppState::new(connections, config.mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;
    use crate::db::MemoryConnector;
    use crate::error::DbError;

    fn config(mode: DeploymentMode, url: Option<&str>) -> ServerConfig {
        ServerConfig {
            mode,
            database_url: url.map(str::to_owned),
            ..ServerConfig::default()
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    async fn bootstrap_logs(url: Option<&str>) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        bootstrap(
            &config(DeploymentMode::PerInvocation, url),
            Arc::new(MemoryConnector::new()),
        )
        .await
        .unwrap();
        logs.contents()
    }

    #[tokio::test]
    async fn missing_url_is_warned_about_once_resolved() {
        assert!(bootstrap_logs(None)
            .await
            .contains("DATABASE_URL is not defined"));
        assert!(!bootstrap_logs(Some("memory://local"))
            .await
            .contains("DATABASE_URL is not defined"));
    }

    #[tokio::test]
    async fn always_on_connects_at_startup() {
        let connector = MemoryConnector::new();
        let state = bootstrap(
            &config(DeploymentMode::AlwaysOn, Some("memory://")),
            Arc::new(connector.clone()),
        )
        .await
        .unwrap();

        assert!(state.connections().is_connected().await);
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn always_on_fails_fast() {
        let result = bootstrap(
            &config(DeploymentMode::AlwaysOn, Some("memory://")),
            Arc::new(MemoryConnector::unreachable()),
        )
        .await;
        assert!(matches!(result, Err(DbError::Connection(_))));

        let result = bootstrap(
            &config(DeploymentMode::AlwaysOn, None),
            Arc::new(MemoryConnector::new()),
        )
        .await;
        assert!(matches!(result, Err(DbError::Configuration(_))));
    }

    #[tokio::test]
    async fn per_invocation_defers_connect() {
        let connector = MemoryConnector::unreachable();
        let state = bootstrap(
            &config(DeploymentMode::PerInvocation, Some("memory://")),
            Arc::new(connector.clone()),
        )
        .await
        .unwrap();

        assert!(!state.connections().is_connected().await);
        assert_eq!(connector.attempts(), 0);
        assert!(state.store().await.is_err());
    }
}
