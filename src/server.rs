use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use serde::Deserialize;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::{
    error::ErrorVerbosity,
    route,
    state::ApiState,
    store::{BookStore, DatabaseConfig, MemoryBookStore, PgBookStore},
};

#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    #[serde(default)]
    error_verbosity: ErrorVerbosity,
    /// Books are kept in memory if no database is configured.
    #[serde(default)]
    database: Option<DatabaseConfig>,
}

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        error_verbosity: ErrorVerbosity,
        database: Option<DatabaseConfig>,
    ) -> Self {
        Self {
            socket_address,
            error_verbosity,
            database,
        }
    }

    pub fn with_socket_address(mut self, socket_address: SocketAddr) -> Self {
        self.socket_address = socket_address;
        self
    }

    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let (book_store, pool): (Box<dyn BookStore>, Option<PgPool>) = match &self.config.database
        {
            Some(database) => {
                let store = PgBookStore::connect(database)
                    .await
                    .context("Failed to connect to database")?;
                let pool = store.pool().clone();
                let book_store: Box<dyn BookStore> = Box::new(store);

                (book_store, Some(pool))
            }
            None => {
                tracing::warn!("No database configured, books are kept in memory");

                let book_store: Box<dyn BookStore> = Box::new(MemoryBookStore::new());

                (book_store, None)
            }
        };

        let state = ApiState::new(self.config.error_verbosity, book_store);
        let app = route::app(state);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        if let Some(pool) = pool {
            pool.close().await;

            tracing::info!("Database connections closed");
        }

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
