use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if gateways are reachable
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Check POI database
    if state.poi_repo.health_check().await {
        status["checks"]["database"] = json!("ok");
    } else {
        status["checks"]["database"] = json!({"error": "unreachable"});
        status["status"] = json!("error");
    }

    // Check proposal store
    let backend = state.store.backend_name();
    if state.store.health_check().await {
        status["checks"]["proposal_store"] = json!({"backend": backend, "status": "ok"});
    } else {
        status["checks"]["proposal_store"] = json!({"backend": backend, "status": "error"});
        status["status"] = json!("error");
    }

    Json(status)
}
