use axum::{extract::State, response::Json};
use estoque_analytics::available_years;
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "estoque-dashboard",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    // Inventory
    let years = available_years(&state.inventory);
    let inventory_status = if state.inventory.is_empty() {
        json!({"status": "unhealthy", "message": "No records loaded"})
    } else {
        json!({
            "status": "healthy",
            "source": state.source.as_ref(),
            "records": state.inventory.len(),
            "latest_year": years.first(),
            "earliest_year": years.last(),
        })
    };
    health_status["checks"]["inventory"] = inventory_status;

    // Metrics
    health_status["checks"]["metrics"] = json!({
        "status": "healthy",
        "enabled": state.config.monitoring.metrics_enabled,
    });

    if health_status["checks"]["inventory"]["status"] != "healthy" {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}
