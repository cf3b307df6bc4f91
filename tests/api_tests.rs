use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{test_state, EchoNarrator, StaticPoiRepository, WalkingDirections};

fn setup_test_app() -> Router {
    let state = test_state(
        Arc::new(StaticPoiRepository::kyoto()),
        Arc::new(WalkingDirections::new()),
        Arc::new(EchoNarrator),
    );
    Router::new().nest("/api/v1", strollroute::routes::create_router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = setup_test_app();

    let (status, json) = send(&app, get("/api/v1/debug/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["database"], "ok");
    assert_eq!(json["checks"]["proposal_store"]["backend"], "memory");
}

#[tokio::test]
async fn test_list_scenarios() {
    let app = setup_test_app();

    let (status, json) = send(&app, get("/api/v1/themes/horror/scenarios")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["theme"], "horror");
    let scenarios = json["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 4);
    assert_eq!(scenarios[0]["id"], "ghost_tour");
    assert_eq!(scenarios[0]["name"], "Ghost Tour");
}

#[tokio::test]
async fn test_list_scenarios_unknown_theme() {
    let app = setup_test_app();

    let (status, json) = send(&app, get("/api/v1/themes/shopping/scenarios")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("shopping"));
}

#[tokio::test]
async fn test_create_and_fetch_proposals() {
    let app = setup_test_app();

    let (status, json) = send(
        &app,
        post(
            "/api/v1/routes/proposals",
            json!({
                "theme": "gourmet",
                "start": {"lat": 35.0041, "lng": 135.7681},
                "time_minutes": 60,
                "realtime_context": {"weather": "cloudy"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", json);
    let proposals = json["proposals"].as_array().unwrap();
    assert!(!proposals.is_empty());

    let first = &proposals[0];
    assert_eq!(first["theme"], "gourmet");
    assert!(first["estimated_duration_minutes"].as_u64().unwrap() <= 60);
    let steps = first["navigation_steps"].as_array().unwrap();
    assert!(steps.iter().any(|s| s["type"] == "poi"));
    assert!(steps.iter().any(|s| s["type"] == "navigation"));

    let id = first["proposal_id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/v1/routes/proposals/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], first["title"]);
}

#[tokio::test]
async fn test_create_proposals_validation() {
    let app = setup_test_app();

    let (status, _) = send(
        &app,
        post(
            "/api/v1/routes/proposals",
            json!({
                "theme": "nature",
                "scenarios": [],
                "start": {"lat": 35.0041, "lng": 135.7681}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_candidates_is_unprocessable() {
    let state = test_state(
        Arc::new(StaticPoiRepository::new(vec![])),
        Arc::new(WalkingDirections::new()),
        Arc::new(EchoNarrator),
    );
    let app = Router::new().nest("/api/v1", strollroute::routes::create_router(state));

    let (status, json) = send(
        &app,
        post(
            "/api/v1/routes/proposals",
            json!({"theme": "nature", "start": {"lat": 35.0041, "lng": 135.7681}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("all scenarios failed"));
}

#[tokio::test]
async fn test_missing_proposal_is_404() {
    let app = setup_test_app();

    let (status, _) = send(&app, get("/api/v1/routes/proposals/prop_missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recalculate_endpoint() {
    let app = setup_test_app();

    let (_, json) = send(
        &app,
        post(
            "/api/v1/routes/proposals",
            json!({
                "theme": "nature",
                "scenarios": ["park_tour"],
                "start": {"lat": 35.0041, "lng": 135.7681}
            }),
        ),
    )
    .await;
    let proposal = &json["proposals"][0];
    let id = proposal["proposal_id"].as_str().unwrap();
    let first_stop = proposal["navigation_steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["type"] == "poi")
        .unwrap();

    let (status, json) = send(
        &app,
        post(
            "/api/v1/routes/recalculate",
            json!({
                "proposal_id": id,
                "current_location": {
                    "lat": first_stop["latitude"],
                    "lng": first_stop["longitude"]
                },
                "visited_poi_ids": [first_stop["poi_id"]],
                "realtime_context": {"weather": "rainy", "time_of_day": "night"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", json);
    let updated = &json["updated_route"];
    assert_eq!(updated["proposal_id"], id);
    assert!(updated["generated_story"]
        .as_str()
        .unwrap()
        .ends_with("rainy night."));
    assert!(updated["navigation_steps"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["poi_id"] != first_stop["poi_id"]));
}

#[tokio::test]
async fn test_recalculate_unknown_proposal() {
    let app = setup_test_app();

    let (status, _) = send(
        &app,
        post(
            "/api/v1/routes/recalculate",
            json!({
                "proposal_id": "prop_missing",
                "current_location": {"lat": 35.0041, "lng": 135.7681},
                "visited_poi_ids": []
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
