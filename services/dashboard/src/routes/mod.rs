use axum::{routing::get, Router};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .nest("/filters", filter_routes())
        .nest("/dashboard", dashboard_routes())
}

fn filter_routes() -> Router<AppState> {
    Router::new()
        .route("/years", get(get_years))
        .route("/months", get(get_months))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/overview", get(get_overview))
        .route("/top-manufacturers", get(get_top_manufacturers))
        .route("/manufacturers", get(get_manufacturer_performance))
        .route("/quantities", get(get_quantity_comparison))
        .route("/low-availability", get(get_low_availability))
        .route("/critical", get(get_critical_products))
        .route("/damage", get(get_damage))
        .route("/stale-stock", get(get_stale_stock))
        .route("/thresholds", get(get_threshold_bounds))
}
