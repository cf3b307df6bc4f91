use crate::error::{AppError, Result};
use crate::models::Theme;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ScenarioInfo {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ScenarioListResponse {
    pub theme: &'static str,
    pub scenarios: Vec<ScenarioInfo>,
}

/// GET /themes/{theme}/scenarios
pub async fn list_scenarios(
    State(state): State<Arc<AppState>>,
    Path(theme): Path<String>,
) -> Result<Json<ScenarioListResponse>> {
    let theme = Theme::from_str(&theme).map_err(AppError::InvalidRequest)?;
    let strategy = state.suggestion.strategies().get(theme);

    let scenarios = strategy
        .available_scenarios()
        .into_iter()
        .map(|scenario| ScenarioInfo {
            id: scenario.as_str(),
            name: scenario.display_name(),
        })
        .collect();

    Ok(Json(ScenarioListResponse {
        theme: theme.as_str(),
        scenarios,
    }))
}
