//! Mock list server
//!
//! Serves `GET /api/list/data?page=&pageSize=` from a [`MockCatalog`], with an
//! artificial delay on every page inside the catalog so the loading states of
//! the client are visible.

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{catalog::MockCatalog, page::ListQuery},
    infrastructure::{config::ServerConfig, http_source::LIST_PATH},
};

/// Upper bound for `pageSize`; larger requests are clamped
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone)]
pub struct ServerState {
    catalog: MockCatalog,
    delay: Duration,
    default_page_size: u32,
}

impl ServerState {
    pub fn new(catalog: MockCatalog, delay: Duration, default_page_size: u32) -> Self {
        Self {
            catalog,
            delay,
            default_page_size: default_page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl From<&ServerConfig> for ServerState {
    fn from(config: &ServerConfig) -> Self {
        Self::new(
            MockCatalog::new(config.total_pages),
            Duration::from_millis(config.delay_ms),
            config.default_page_size,
        )
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(LIST_PATH, get(list_data))
        .with_state(state)
}

async fn index() -> &'static str {
    "mock list server"
}

async fn list_data(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let page = query.page();
    let page_size = query.page_size(state.default_page_size).min(MAX_PAGE_SIZE);

    // pages past the end answer immediately
    if !state.catalog.is_past_end(page) && !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    log::debug!("serving page {page} (size {page_size})");
    let response = state.catalog.page(page, page_size);
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(response))
}

/// A bound, not yet running server
pub struct MockServer {
    listener: TcpListener,
    state: ServerState,
}

impl MockServer {
    pub async fn bind(config: &ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
        Ok(Self {
            listener,
            state: ServerState::from(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` is cancelled
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let addr = self.local_addr()?;
        log::info!("Mock server is running at http://{addr}");
        log::info!("Test endpoint: http://{addr}{LIST_PATH}?page=1");

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        log::info!("Mock server stopped");
        Ok(())
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let server = MockServer::bind(config).await?;
    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });
    server.run(shutdown).await
}
