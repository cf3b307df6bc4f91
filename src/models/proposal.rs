use crate::models::{Coordinates, Poi, Theme};
use serde::{Deserialize, Serialize};

/// One entry of the walk, tagged on the wire as `{"type": "poi" | "navigation", ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationStep {
    Poi {
        name: String,
        poi_id: String,
        latitude: f64,
        longitude: f64,
        /// Great-circle distance to the following stop; 0 for the last stop
        distance_to_next_meters: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Navigation {
        description: String,
    },
}

impl NavigationStep {
    pub fn poi_id(&self) -> Option<&str> {
        match self {
            NavigationStep::Poi { poi_id, .. } => Some(poi_id),
            NavigationStep::Navigation { .. } => None,
        }
    }

    /// Rebuild a minimal POI from a `poi` step. Categories and rating are not
    /// part of the step, so the result carries neither.
    pub fn to_poi(&self) -> Option<Poi> {
        match self {
            NavigationStep::Poi {
                name,
                poi_id,
                latitude,
                longitude,
                ..
            } => Some(Poi {
                id: poi_id.clone(),
                name: name.clone(),
                coordinates: Coordinates {
                    lat: *latitude,
                    lng: *longitude,
                },
                categories: Vec::new(),
                rating: 0.0,
                url: None,
                grid_cell_id: None,
            }),
            NavigationStep::Navigation { .. } => None,
        }
    }
}

/// A persisted rendering of a suggested route plus its narrative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteProposal {
    pub proposal_id: String,
    pub title: String,
    pub estimated_duration_minutes: u32,
    pub estimated_distance_meters: u32,
    pub theme: Theme,
    pub display_highlights: Vec<String>,
    pub navigation_steps: Vec<NavigationStep>,
    pub route_polyline: String,
    pub generated_story: String,
}

impl RouteProposal {
    /// POIs of the walk in their original order
    pub fn pois(&self) -> Vec<Poi> {
        self.navigation_steps
            .iter()
            .filter_map(NavigationStep::to_poi)
            .collect()
    }
}

/// Result of a mid-walk recalculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedRoute {
    pub proposal_id: String,
    pub title: String,
    pub estimated_duration_minutes: u32,
    pub estimated_distance_meters: u32,
    pub highlights: Vec<String>,
    pub navigation_steps: Vec<NavigationStep>,
    pub route_polyline: String,
    pub generated_story: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub proposals: Vec<RouteProposal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecalculateResponse {
    pub updated_route: UpdatedRoute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_step_wire_format() {
        let step = NavigationStep::Poi {
            name: "Shimogamo Shrine".into(),
            poi_id: "poi_1".into(),
            latitude: 35.039,
            longitude: 135.772,
            distance_to_next_meters: 420,
            description: None,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["type"], "poi");
        assert_eq!(json["poi_id"], "poi_1");
        assert!(json.get("description").is_none());

        let nav: NavigationStep =
            serde_json::from_str(r#"{"type":"navigation","description":"Head north"}"#).unwrap();
        assert_eq!(
            nav,
            NavigationStep::Navigation {
                description: "Head north".into()
            }
        );
    }

    #[test]
    fn test_pois_skip_navigation_steps() {
        let proposal = RouteProposal {
            proposal_id: "prop_x".into(),
            title: "t".into(),
            estimated_duration_minutes: 40,
            estimated_distance_meters: 2000,
            theme: Theme::Nature,
            display_highlights: vec![],
            navigation_steps: vec![
                NavigationStep::Navigation {
                    description: "Head to A".into(),
                },
                NavigationStep::Poi {
                    name: "A".into(),
                    poi_id: "a".into(),
                    latitude: 35.0,
                    longitude: 135.0,
                    distance_to_next_meters: 0,
                    description: None,
                },
            ],
            route_polyline: String::new(),
            generated_story: String::new(),
        };

        let pois = proposal.pois();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, "a");
        assert_eq!(pois[0].coordinates.lat, 35.0);
    }
}
