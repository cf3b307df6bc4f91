//! Turns an ordered stop list into navigation steps. Distances are
//! great-circle, so hydration never costs a directions call.

use crate::models::{NavigationStep, Poi};

#[derive(Debug, Clone)]
pub struct HydratedSteps {
    pub steps: Vec<NavigationStep>,
    /// Sum of the legs between consecutive stops
    pub total_distance_meters: u32,
}

/// A leading `navigation` step towards the first stop, then one `poi`
/// step per stop carrying the distance to the following stop.
pub fn hydrate(pois: &[Poi]) -> HydratedSteps {
    let mut steps = Vec::with_capacity(pois.len() + 1);
    let mut total = 0.0;

    if let Some(first) = pois.first() {
        steps.push(NavigationStep::Navigation {
            description: format!("Head to {}", first.name),
        });
    }

    for (i, poi) in pois.iter().enumerate() {
        let to_next = pois
            .get(i + 1)
            .map(|next| poi.coordinates.distance_meters_to(&next.coordinates))
            .unwrap_or(0.0);
        total += to_next;

        steps.push(NavigationStep::Poi {
            name: poi.name.clone(),
            poi_id: poi.id.clone(),
            latitude: poi.coordinates.lat,
            longitude: poi.coordinates.lng,
            distance_to_next_meters: to_next.round() as u32,
            description: Some(format!("Stop by {}", poi.name)),
        });
    }

    HydratedSteps {
        steps,
        total_distance_meters: total.round() as u32,
    }
}

pub fn highlights(pois: &[Poi]) -> Vec<String> {
    pois.iter().map(|poi| poi.name.clone()).collect()
}
