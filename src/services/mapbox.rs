use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::directions::{DirectionsProvider, WalkingRoute};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";
const WALKING_PROFILE: &str = "walking";
/// Mapbox accepts at most 25 coordinates per request
const MAX_COORDINATES: usize = 25;

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }

    fn request_url(&self, origin: &Coordinates, waypoints: &[Coordinates]) -> String {
        // Format coordinates as "lng,lat;lng,lat;..."
        let coordinates_str = std::iter::once(origin)
            .chain(waypoints.iter())
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!("{}/{}/{}", self.base_url, WALKING_PROFILE, coordinates_str)
    }
}

#[async_trait]
impl DirectionsProvider for MapboxClient {
    async fn walking_route(
        &self,
        origin: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<WalkingRoute> {
        if waypoints.is_empty() {
            return Err(AppError::InvalidRequest(
                "At least 1 waypoint required".to_string(),
            ));
        }
        if waypoints.len() + 1 > MAX_COORDINATES {
            return Err(AppError::InvalidRequest(format!(
                "Maximum {} waypoints allowed",
                MAX_COORDINATES - 1
            )));
        }

        let url = self.request_url(origin, waypoints);

        tracing::debug!(
            waypoints = waypoints.len(),
            "Mapbox API request: origin + {} waypoints, profile {}",
            waypoints.len(),
            WALKING_PROFILE
        );

        let mut request = self.client.get(&url).query(&[
            ("geometries", "polyline"),
            ("overview", "full"),
            ("steps", "false"),
        ]);

        match self.auth_mode {
            AuthMode::DirectToken => {
                request = request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                waypoints = waypoints.len(),
                "Mapbox API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        directions.into_walking_route(waypoints.len())
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    routes: Vec<MapboxRoute>,
    code: String,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    duration: f64, // seconds
    geometry: String, // encoded polyline
}

impl MapboxDirectionsApiResponse {
    fn into_walking_route(self, waypoint_count: usize) -> Result<WalkingRoute> {
        if self.code != "Ok" {
            return Err(AppError::DirectionsApi(format!(
                "Mapbox returned code {}",
                self.code
            )));
        }

        let Some(route) = self.routes.into_iter().next() else {
            tracing::warn!(
                waypoints = waypoint_count,
                "Mapbox returned 0 routes for {} waypoints",
                waypoint_count
            );
            return Err(AppError::DirectionsApi("No routes found".to_string()));
        };

        tracing::debug!(
            duration_min = %format!("{:.0}", route.duration / 60.0),
            "Mapbox response: {:.0}min",
            route.duration / 60.0
        );

        Ok(WalkingRoute {
            duration_seconds: route.duration,
            encoded_path: route.geometry,
        })
    }
}
