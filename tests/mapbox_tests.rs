use strollroute::models::Coordinates;
use strollroute::services::directions::DirectionsProvider;
use strollroute::services::mapbox::MapboxClient;

mod common;

fn live_client() -> Option<MapboxClient> {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return None;
    }
    match std::env::var("MAPBOX_API_KEY") {
        Ok(key) if !key.is_empty() => Some(MapboxClient::new(key)),
        _ => {
            println!("MAPBOX_API_KEY not set, skipping real API test");
            None
        }
    }
}

#[tokio::test]
async fn test_mapbox_walking_route() {
    let Some(client) = live_client() else {
        return;
    };

    // Shijo-Kawaramachi to Yasaka Shrine
    let origin = Coordinates::new(35.0041, 135.7681).unwrap();
    let shrine = Coordinates::new(35.0037, 135.7785).unwrap();

    let route = client
        .walking_route(&origin, &[shrine])
        .await
        .expect("Mapbox API call should succeed");

    assert!(!route.encoded_path.is_empty(), "Path should not be empty");
    // About 1km on foot
    let minutes = route.duration_minutes();
    assert!(
        (5..=30).contains(&minutes),
        "Duration should be reasonable: got {}min",
        minutes
    );
}

#[tokio::test]
async fn test_mapbox_multi_stop_is_longer() {
    let Some(client) = live_client() else {
        return;
    };

    let origin = Coordinates::new(35.0041, 135.7681).unwrap();
    let river = Coordinates::new(35.0050, 135.7720).unwrap();
    let shrine = Coordinates::new(35.0037, 135.7785).unwrap();

    let direct = client.walking_route(&origin, &[shrine]).await.unwrap();
    let detour = client.walking_route(&origin, &[shrine, river]).await.unwrap();

    assert!(detour.duration_seconds > direct.duration_seconds);
}

#[tokio::test]
async fn test_mapbox_rejects_empty_waypoints() {
    // Validation happens before any request, so no key is needed
    let client = MapboxClient::new("unused".to_string());
    let origin = Coordinates::new(35.0041, 135.7681).unwrap();

    let result = client.walking_route(&origin, &[]).await;

    assert!(matches!(
        result,
        Err(strollroute::AppError::InvalidRequest(_))
    ));
}
