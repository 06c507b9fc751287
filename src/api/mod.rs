//! HTTP layer exposing the dashboard views as JSON.

pub mod routes;
pub mod types;

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{
    config::Settings,
    data::{
        openfda::{OpenFdaClient, MAX_LIMIT},
        report::AdverseEventReport,
    },
    error::DashResult,
};

type CacheKey = (Option<String>, usize);

/// Shared state: settings, the openFDA client and a response cache that
/// lives until the process exits.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    client: OpenFdaClient,
    cache: Arc<RwLock<HashMap<CacheKey, Arc<Vec<AdverseEventReport>>>>>,
}

impl AppState {
    pub fn new(settings: Settings) -> DashResult<Self> {
        let client = OpenFdaClient::new(&settings)?;
        Ok(Self {
            settings,
            client,
            cache: Arc::default(),
        })
    }

    /// Fetch through the cache. Errors are not cached. The key uses the
    /// capped limit, so limits above [`MAX_LIMIT`] share one entry.
    pub async fn reports(
        &self,
        query: Option<&str>,
        limit: usize,
    ) -> DashResult<Arc<Vec<AdverseEventReport>>> {
        let key = (
            query.map(|q| q.trim().to_ascii_uppercase()),
            limit.min(MAX_LIMIT),
        );
        if let Some(hit) = self.cache.read().await.get(&key) {
            debug!(?key, "cache hit");
            return Ok(Arc::clone(hit));
        }
        let reports = Arc::new(self.client.fetch_reports(query, limit).await?);
        self.cache.write().await.insert(key, Arc::clone(&reports));
        Ok(reports)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/top-drugs", get(routes::top_drugs))
        .route("/api/search", get(routes::search))
        .route("/api/roles", get(routes::roles))
        .route("/api/trend", get(routes::trend))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState::new(settings)?;
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving fda-dash API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
