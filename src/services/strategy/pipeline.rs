//! Static description of how each theme assembles its stops.
//!
//! A scenario is an ordered list of roles. Each role searches around a
//! center, walking its escalation tiers until one yields a candidate, and
//! picks one POI from that tier.

use crate::models::{Coordinates, Poi, PoiCategory, Scenario, Theme};
use std::cmp::Ordering;

/// One search attempt: categories at a radius with a result cap
#[derive(Debug, Clone, Copy)]
pub struct SearchTier {
    pub categories: &'static [PoiCategory],
    pub radius_m: f64,
    pub limit: i64,
}

pub const fn tier(categories: &'static [PoiCategory], radius_m: f64, limit: i64) -> SearchTier {
    SearchTier {
        categories,
        radius_m,
        limit,
    }
}

/// Where a role centers its search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCenter {
    Origin,
    /// The first chosen stop, or the origin before any
    Anchor,
    /// The most recently chosen stop, or the origin before any
    PreviousStop,
    /// Midpoint of the last two chosen stops, degrading to `PreviousStop`
    MidpointOfLastTwo,
}

/// How a role chooses among the candidates of its tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    HighestRated,
    Nearest,
    /// Highest-rated among candidates that also carry the category, else
    /// highest-rated overall
    PreferCategory(PoiCategory),
}

#[derive(Debug, Clone, Copy)]
pub struct RoleStep {
    pub role: &'static str,
    pub center: SearchCenter,
    pub tiers: &'static [SearchTier],
    pub pick: Pick,
    /// A required role with no candidate ends the scenario
    pub required: bool,
}

pub const fn role(
    role: &'static str,
    center: SearchCenter,
    tiers: &'static [SearchTier],
    pick: Pick,
    required: bool,
) -> RoleStep {
    RoleStep {
        role,
        center,
        tiers,
        pick,
        required,
    }
}

#[derive(Debug)]
pub struct ScenarioPipeline {
    pub scenario: Scenario,
    pub roles: &'static [RoleStep],
    /// Fewest stops that still make a walk worth suggesting
    pub min_stops: usize,
    /// Shortened pipeline used when the walk ends at a fixed destination
    pub destination_roles: &'static [RoleStep],
    /// Categories tried first when snapping the destination to a POI
    pub destination_categories: &'static [PoiCategory],
}

#[derive(Debug)]
pub struct ThemeCatalog {
    pub theme: Theme,
    pub scenarios: &'static [ScenarioPipeline],
    pub explore_categories: &'static [PoiCategory],
    pub explore_radii_m: [f64; 3],
    pub explore_limit: i64,
    /// Name fragments this theme never suggests
    pub excluded_name_fragments: &'static [&'static str],
}

impl ThemeCatalog {
    pub fn pipeline(&self, scenario: Scenario) -> Option<&'static ScenarioPipeline> {
        self.scenarios.iter().find(|p| p.scenario == scenario)
    }

    pub fn scenario_ids(&self) -> Vec<Scenario> {
        self.scenarios.iter().map(|p| p.scenario).collect()
    }

    pub fn excludes_name(&self, name: &str) -> bool {
        self.excluded_name_fragments
            .iter()
            .any(|fragment| name.contains(fragment))
    }
}

impl SearchCenter {
    pub fn resolve(&self, origin: Coordinates, chosen: &[Poi]) -> Coordinates {
        match (self, chosen) {
            (SearchCenter::Origin, _) => origin,
            (_, []) => origin,
            (SearchCenter::Anchor, [first, ..]) => first.coordinates,
            (SearchCenter::PreviousStop, [.., last]) => last.coordinates,
            (SearchCenter::MidpointOfLastTwo, [only]) => only.coordinates,
            (SearchCenter::MidpointOfLastTwo, [.., a, b]) => a.coordinates.midpoint(&b.coordinates),
        }
    }
}

fn compare_rating_then_distance(a: &Poi, b: &Poi, center: &Coordinates) -> Ordering {
    b.rating
        .partial_cmp(&a.rating)
        .unwrap_or(Ordering::Equal)
        .then_with(|| compare_distance(a, b, center))
}

fn compare_distance(a: &Poi, b: &Poi, center: &Coordinates) -> Ordering {
    a.distance_from(center)
        .partial_cmp(&b.distance_from(center))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}

impl Pick {
    /// Choose one candidate. Ties fall through rating, then distance to
    /// `center`, then id, so the choice never depends on result order.
    pub fn select<'a>(&self, candidates: &'a [Poi], center: &Coordinates) -> Option<&'a Poi> {
        match self {
            Pick::HighestRated => candidates
                .iter()
                .min_by(|a, b| compare_rating_then_distance(a, b, center)),
            Pick::Nearest => candidates
                .iter()
                .min_by(|a, b| compare_distance(a, b, center)),
            Pick::PreferCategory(category) => candidates
                .iter()
                .filter(|p| p.has_category(*category))
                .min_by(|a, b| compare_rating_then_distance(a, b, center))
                .or_else(|| Pick::HighestRated.select(candidates, center)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: &str, lat: f64, rating: f64, categories: &[PoiCategory]) -> Poi {
        Poi::new(id, id, Coordinates::new(lat, 135.77).unwrap(), categories, rating)
    }

    fn origin() -> Coordinates {
        Coordinates::new(35.0, 135.77).unwrap()
    }

    const NEAR_PARK: &[SearchTier] = &[tier(&[PoiCategory::Park], 500.0, 5)];
    const PARK_ROLE: RoleStep = role("park", SearchCenter::Origin, NEAR_PARK, Pick::Nearest, true);

    #[test]
    fn test_role_is_usable_in_const_tables() {
        assert_eq!(PARK_ROLE.role, "park");
        assert!(PARK_ROLE.required);
        assert_eq!(PARK_ROLE.tiers.len(), 1);
        assert_eq!(PARK_ROLE.tiers[0].categories, &[PoiCategory::Park]);
        assert!(matches!(PARK_ROLE.pick, Pick::Nearest));
        assert!(matches!(PARK_ROLE.center, SearchCenter::Origin));
    }

    #[test]
    fn test_highest_rated_breaks_ties_by_distance() {
        let candidates = vec![
            poi("far", 35.02, 4.5, &[]),
            poi("near", 35.01, 4.5, &[]),
            poi("low", 35.001, 3.0, &[]),
        ];
        let picked = Pick::HighestRated.select(&candidates, &origin()).unwrap();
        assert_eq!(picked.id, "near");
    }

    #[test]
    fn test_nearest_breaks_ties_by_id() {
        let candidates = vec![poi("b", 35.01, 1.0, &[]), poi("a", 35.01, 5.0, &[])];
        assert_eq!(Pick::Nearest.select(&candidates, &origin()).unwrap().id, "a");
    }

    #[test]
    fn test_prefer_category_falls_back() {
        let candidates = vec![
            poi("temple", 35.01, 4.8, &[PoiCategory::PlaceOfWorship]),
            poi("garden_temple", 35.02, 4.1, &[PoiCategory::PlaceOfWorship, PoiCategory::Park]),
        ];
        let pick = Pick::PreferCategory(PoiCategory::Park);
        assert_eq!(pick.select(&candidates, &origin()).unwrap().id, "garden_temple");
        assert_eq!(pick.select(&candidates[..1], &origin()).unwrap().id, "temple");
        assert!(pick.select(&[], &origin()).is_none());
    }

    #[test]
    fn test_search_center_resolution() {
        let a = poi("a", 35.02, 4.0, &[]);
        let b = poi("b", 35.04, 4.0, &[]);

        assert_eq!(SearchCenter::PreviousStop.resolve(origin(), &[]), origin());
        assert_eq!(
            SearchCenter::PreviousStop.resolve(origin(), &[a.clone(), b.clone()]),
            b.coordinates
        );
        assert_eq!(SearchCenter::Origin.resolve(origin(), &[a.clone()]), origin());
        assert_eq!(
            SearchCenter::Anchor.resolve(origin(), &[a.clone(), b.clone()]),
            a.coordinates
        );
        assert_eq!(
            SearchCenter::MidpointOfLastTwo.resolve(origin(), &[a.clone()]),
            a.coordinates
        );
        let mid = SearchCenter::MidpointOfLastTwo.resolve(origin(), &[a, b]);
        assert!((mid.lat - 35.03).abs() < 1e-9);
    }
}
