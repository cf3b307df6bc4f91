use crate::error::Result;
use crate::models::Coordinates;
use async_trait::async_trait;
use serde::Serialize;

/// Walking duration and path for one ordered waypoint list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WalkingRoute {
    pub duration_seconds: f64,
    /// Encoded polyline (precision 5)
    pub encoded_path: String,
}

impl WalkingRoute {
    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).round() as u32
    }
}

/// Directions gateway. The last waypoint is the destination.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn walking_route(
        &self,
        origin: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<WalkingRoute>;
}
