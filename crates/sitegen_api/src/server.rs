//! Application assembly and listener lifecycle.

use crate::config::ServerConfig;
use crate::routes::router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use log::info;
use sitegen_core::ProjectStore;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS origin `{0}`")]
    InvalidOrigin(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Builds the full application: project routes plus CORS.
pub fn build_app(
    store: Arc<dyn ProjectStore>,
    allowed_origins: &[String],
) -> Result<Router, ServerError> {
    Ok(router(store).layer(cors_layer(allowed_origins)?))
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, ServerError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true))
}

/// Binds the configured address and serves until ctrl-c.
pub async fn serve(config: &ServerConfig, store: Arc<dyn ProjectStore>) -> Result<(), ServerError> {
    let app = build_app(store, &config.allowed_origins)?;
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.listen_addr,
            source,
        })?;
    run(listener, app, shutdown_signal()).await
}

/// Serves `app` on an already-bound listener until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!("event=server_listen module=server status=ok addr=http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("event=server_stop module=server status=ok addr=http://{addr}");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
}
