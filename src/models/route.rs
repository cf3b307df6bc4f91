use crate::constants::{DEFAULT_TIME_OF_DAY, DEFAULT_WEATHER};
use crate::models::{Coordinates, Poi, Scenario};
use serde::{Deserialize, Serialize};

/// A thematically coherent set of stops proposed by a strategy. Not yet a
/// route: no ordering has been timed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCombination {
    pub scenario: Scenario,
    /// Stops the optimizer is free to reorder
    pub stops: Vec<Poi>,
    /// Fixed final stop, held last in every ordering
    pub destination: Option<Poi>,
}

impl CandidateCombination {
    pub fn new(scenario: Scenario, stops: Vec<Poi>) -> Self {
        CandidateCombination {
            scenario,
            stops,
            destination: None,
        }
    }

    pub fn with_destination(scenario: Scenario, stops: Vec<Poi>, destination: Poi) -> Self {
        CandidateCombination {
            scenario,
            stops,
            destination: Some(destination),
        }
    }

    /// Number of entries including the destination
    pub fn len(&self) -> usize {
        self.stops.len() + usize::from(self.destination.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when some POI id appears twice across stops and destination
    pub fn has_duplicates(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.stops
            .iter()
            .chain(self.destination.iter())
            .any(|poi| !seen.insert(poi.id.as_str()))
    }
}

/// A timed, ordered route confirmed by the directions service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedRoute {
    pub name: String,
    /// Stops in walking order; a fixed destination is last
    pub pois: Vec<Poi>,
    pub total_duration_minutes: u32,
    /// Encoded polyline of the walking path
    pub polyline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RealtimeContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

impl RealtimeContext {
    pub fn weather_or_default(&self) -> &str {
        self.weather.as_deref().unwrap_or(DEFAULT_WEATHER)
    }

    pub fn time_of_day_or_default(&self) -> &str {
        self.time_of_day.as_deref().unwrap_or(DEFAULT_TIME_OF_DAY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<String>>,
    pub start: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
    #[serde(default)]
    pub realtime_context: RealtimeContext,
}

impl SuggestionRequest {
    pub fn validate(&self) -> Result<(), String> {
        self.start.validate().map_err(|e| format!("start: {}", e))?;
        if let Some(ref destination) = self.destination {
            destination
                .validate()
                .map_err(|e| format!("destination: {}", e))?;
        }
        if let Some(ref scenarios) = self.scenarios {
            if scenarios.is_empty() {
                return Err("scenarios must not be an empty list".to_string());
            }
        }
        if self.time_minutes == Some(0) {
            return Err("time_minutes must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateRequest {
    pub proposal_id: String,
    pub current_location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Coordinates>,
    #[serde(default)]
    pub visited_poi_ids: Vec<String>,
    #[serde(default)]
    pub realtime_context: RealtimeContext,
}

impl RecalculateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.proposal_id.trim().is_empty() {
            return Err("proposal_id must not be empty".to_string());
        }
        self.current_location
            .validate()
            .map_err(|e| format!("current_location: {}", e))?;
        if let Some(ref destination) = self.destination {
            destination
                .validate()
                .map_err(|e| format!("destination: {}", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PoiCategory;

    fn poi(id: &str) -> Poi {
        Poi::new(
            id,
            id,
            Coordinates::new(35.0, 135.7).unwrap(),
            &[PoiCategory::Park],
            4.0,
        )
    }

    #[test]
    fn test_combination_len_counts_destination() {
        let combo = CandidateCombination::with_destination(
            Scenario::ParkTour,
            vec![poi("a")],
            poi("dest"),
        );
        assert_eq!(combo.len(), 2);
        assert!(!combo.has_duplicates());

        let dup = CandidateCombination::with_destination(
            Scenario::ParkTour,
            vec![poi("a")],
            poi("a"),
        );
        assert!(dup.has_duplicates());
    }

    #[test]
    fn test_realtime_context_defaults() {
        let ctx = RealtimeContext::default();
        assert_eq!(ctx.weather_or_default(), "sunny");
        assert_eq!(ctx.time_of_day_or_default(), "daytime");
    }

    #[test]
    fn test_suggestion_request_validation() {
        let mut req: SuggestionRequest = serde_json::from_value(serde_json::json!({
            "theme": "nature",
            "start": {"lat": 35.0041, "lng": 135.7681}
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        req.scenarios = Some(vec![]);
        assert!(req.validate().is_err());

        req.scenarios = None;
        req.destination = Some(Coordinates { lat: 95.0, lng: 0.0 });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_recalculate_request_validation() {
        let req: RecalculateRequest = serde_json::from_value(serde_json::json!({
            "proposal_id": " ",
            "current_location": {"lat": 35.0, "lng": 135.7}
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
