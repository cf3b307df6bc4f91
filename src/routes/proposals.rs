use crate::error::Result;
use crate::models::{ProposalResponse, RouteProposal, SuggestionRequest};
use crate::routes::RequestDeadline;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

/// POST /routes/proposals
/// Suggest themed walks, narrate them and store them as proposals
pub async fn create_proposals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<ProposalResponse>> {
    tracing::info!(
        theme = %request.theme,
        lat = request.start.lat,
        lng = request.start.lng,
        has_destination = request.destination.is_some(),
        time_minutes = ?request.time_minutes,
        "Proposal request: theme={}, start=({:.4}, {:.4})",
        request.theme, request.start.lat, request.start.lng
    );

    let deadline = RequestDeadline::start(Duration::from_secs(state.engine.request_timeout_secs));
    let proposals = state
        .proposals
        .generate_proposals(&request, deadline.token())
        .await?;

    Ok(Json(ProposalResponse { proposals }))
}

/// GET /routes/proposals/{id}
pub async fn get_proposal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RouteProposal>> {
    let proposal = state.proposals.get_proposal(&id).await?;
    Ok(Json(proposal))
}
