//! Estoque Dashboard Service
//!
//! Read-only HTTP presenter for the inventory analysis views. The inventory
//! file is loaded once at start-up; every request filters and aggregates its
//! own copy, so no filter or threshold state is shared between clients.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use estoque_models::RecordSet;
use estoque_utils::{init_logging, load_inventory, AppConfig, InventoryError, LoadedInventory};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

mod error;
mod handlers;
mod metrics;
mod middleware;
mod routes;

use error::ApiResult;
use metrics::DashboardMetrics;
use middleware::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Estoque Dashboard");

    // Load inventory; any failure here ends the session
    let loaded = match load_inventory(&config.data.path) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, code = e.error_code(), path = %config.data.path, "Failed to load inventory");
            return Err(e.into());
        }
    };

    let state = AppState::new(loaded, config.clone())?;
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Dashboard listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(error_handling_middleware)),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    /// Loaded once, never mutated.
    pub inventory: Arc<RecordSet>,
    pub source: Arc<str>,
    pub config: AppConfig,
    pub metrics: DashboardMetrics,
}

impl AppState {
    pub fn new(loaded: LoadedInventory, config: AppConfig) -> Result<Self> {
        let metrics = DashboardMetrics::new(&config.monitoring.prometheus_namespace)?;
        metrics.record_load(&loaded);

        Ok(Self {
            inventory: Arc::new(loaded.records),
            source: Arc::from(loaded.source.as_str()),
            config,
            metrics,
        })
    }
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "estoque-dashboard",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "source": state.source.as_ref(),
        "records": state.inventory.len(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> ApiResult<String> {
    if !state.config.monitoring.metrics_enabled {
        return Ok(String::new());
    }
    let body = state
        .metrics
        .encode()
        .map_err(|e| InventoryError::internal(format!("Failed to encode metrics: {}", e)))?;
    Ok(body)
}
