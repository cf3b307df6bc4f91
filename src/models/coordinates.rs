use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Re-check the range invariant on a value that came in through serde.
    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.lat, self.lng).map(|_| ())
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Great-circle distance in meters
    pub fn distance_meters_to(&self, other: &Coordinates) -> f64 {
        self.distance_to(other) * 1000.0
    }

    /// Arithmetic midpoint. Walking-scale distances make the planar
    /// approximation indistinguishable from the geodesic one.
    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// Round coordinates to specified decimal places for logging
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lat: (self.lat * multiplier).round() / multiplier,
            lng: (self.lng * multiplier).round() / multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(Coordinates::new(35.0041, 135.7681).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, 181.0).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_deserialized() {
        let c: Coordinates = serde_json::from_str(r#"{"lat": 120.0, "lng": 10.0}"#).unwrap();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_distance_calculation() {
        // Kyoto Station to Kiyomizu-dera, roughly 2.2km apart
        let station = Coordinates::new(34.9858, 135.7588).unwrap();
        let kiyomizu = Coordinates::new(34.9949, 135.7850).unwrap();

        let distance = station.distance_to(&kiyomizu);
        assert!(distance > 2.0 && distance < 2.8, "got {}", distance);

        let meters = station.distance_meters_to(&kiyomizu);
        assert!((meters - distance * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_midpoint() {
        let a = Coordinates::new(35.0, 135.0).unwrap();
        let b = Coordinates::new(35.2, 135.4).unwrap();
        let mid = a.midpoint(&b);
        assert!((mid.lat - 35.1).abs() < 1e-9);
        assert!((mid.lng - 135.2).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_rounding() {
        let coord = Coordinates::new(35.004_123_4, 135.768_198_7).unwrap();
        let rounded = coord.round(3);
        assert_eq!(rounded.lat, 35.004);
        assert_eq!(rounded.lng, 135.768);
    }
}
