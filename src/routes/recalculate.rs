use crate::error::Result;
use crate::models::{RecalculateRequest, RecalculateResponse};
use crate::routes::RequestDeadline;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Duration;

/// POST /routes/recalculate
/// Rebuild a stored walk from the walker's current position
pub async fn recalculate_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecalculateRequest>,
) -> Result<Json<RecalculateResponse>> {
    tracing::info!(
        proposal_id = %request.proposal_id,
        lat = request.current_location.lat,
        lng = request.current_location.lng,
        visited = request.visited_poi_ids.len(),
        has_destination = request.destination.is_some(),
        "Recalculate request for {}",
        request.proposal_id
    );

    let deadline = RequestDeadline::start(Duration::from_secs(state.engine.request_timeout_secs));
    let updated_route = state
        .recalculation
        .recalculate_route(&request, deadline.token())
        .await?;

    Ok(Json(RecalculateResponse { updated_route }))
}
