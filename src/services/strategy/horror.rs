//! Off-beat walks. Spots are sparse, so tiers reach out tens of kilometres.

use super::pipeline::{
    tier, Pick, RoleStep, ScenarioPipeline, SearchCenter, SearchTier, ThemeCatalog,
};
use crate::models::{PoiCategory::*, Scenario, Theme};

const HORROR_SPOT: &[SearchTier] = &[
    tier(&[HorrorSpot], 8000.0, 15),
    tier(&[HorrorSpot, TouristAttraction], 15000.0, 20),
    tier(&[HorrorSpot, TouristAttraction, Establishment], 30000.0, 25),
];

const WORSHIP: &[SearchTier] = &[
    tier(&[PlaceOfWorship], 7000.0, 15),
    tier(&[PlaceOfWorship, TouristAttraction], 12000.0, 20),
    tier(&[PlaceOfWorship, TouristAttraction, Establishment], 25000.0, 25),
];

const NATURAL: &[SearchTier] = &[
    tier(&[NaturalFeature], 6000.0, 15),
    tier(&[NaturalFeature, Park], 10000.0, 20),
    tier(&[NaturalFeature, Park, TouristAttraction], 20000.0, 25),
];

const ESTABLISHMENT: &[SearchTier] = &[
    tier(&[Establishment], 5000.0, 15),
    tier(&[Establishment, Store], 8000.0, 20),
    tier(&[Establishment, Store, TouristAttraction], 15000.0, 25),
];

const STORE: &[SearchTier] = &[
    tier(&[Store], 6000.0, 15),
    tier(&[Store, Establishment], 10000.0, 20),
    tier(&[Store, Establishment, TouristAttraction], 18000.0, 25),
];

const CAFE: &[SearchTier] = &[
    tier(&[Cafe], 7000.0, 15),
    tier(&[Cafe, Store], 12000.0, 20),
    tier(&[Cafe, Store, Establishment], 20000.0, 25),
];

const PARK: &[SearchTier] = &[
    tier(&[Park], 6000.0, 15),
    tier(&[Park, NaturalFeature], 10000.0, 20),
    tier(&[Park, NaturalFeature, TouristAttraction], 18000.0, 25),
];

/// Nearest anchor from the origin
const fn anchor(role: &'static str, tiers: &'static [SearchTier]) -> RoleStep {
    RoleStep {
        role,
        center: SearchCenter::Origin,
        tiers,
        pick: Pick::Nearest,
        required: true,
    }
}

/// Best-rated spot near the anchor
const fn feature(role: &'static str, tiers: &'static [SearchTier]) -> RoleStep {
    RoleStep {
        role,
        center: SearchCenter::PreviousStop,
        tiers,
        pick: Pick::HighestRated,
        required: false,
    }
}

/// Somewhere ordinary to come back to
const fn relief(role: &'static str, tiers: &'static [SearchTier]) -> RoleStep {
    RoleStep {
        role,
        center: SearchCenter::PreviousStop,
        tiers,
        pick: Pick::Nearest,
        required: false,
    }
}

const GHOST_TOUR: &[RoleStep] = &[
    anchor("cursed_temple", WORSHIP),
    feature("main_horror_spot", HORROR_SPOT),
    relief("safe_store", STORE),
];

const HAUNTED_RUINS: &[RoleStep] = &[
    anchor("related_facility", ESTABLISHMENT),
    feature("ruin_spot", HORROR_SPOT),
    relief("cafe", CAFE),
];

const CURSED_NATURE: &[RoleStep] = &[
    anchor("quiet_park", PARK),
    feature("cursed_nature", NATURAL),
    relief("bustling_place", STORE),
];

const CEMETERY_WALK: &[RoleStep] = &[
    anchor("historic_building", WORSHIP),
    feature("memorial", HORROR_SPOT),
    relief("cafe", CAFE),
];

pub static CATALOG: ThemeCatalog = ThemeCatalog {
    theme: Theme::Horror,
    scenarios: &[
        ScenarioPipeline {
            scenario: Scenario::GhostTour,
            roles: GHOST_TOUR,
            min_stops: 1,
            destination_roles: GHOST_TOUR.split_at(2).0,
            destination_categories: &[HorrorSpot, PlaceOfWorship, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::HauntedRuins,
            roles: HAUNTED_RUINS,
            min_stops: 1,
            destination_roles: HAUNTED_RUINS.split_at(2).0,
            destination_categories: &[HorrorSpot, Establishment, Cafe],
        },
        ScenarioPipeline {
            scenario: Scenario::CursedNature,
            roles: CURSED_NATURE,
            min_stops: 1,
            destination_roles: CURSED_NATURE.split_at(2).0,
            destination_categories: &[NaturalFeature, HorrorSpot, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::CemeteryWalk,
            roles: CEMETERY_WALK,
            min_stops: 1,
            destination_roles: CEMETERY_WALK.split_at(2).0,
            destination_categories: &[HorrorSpot, PlaceOfWorship, Cafe],
        },
    ],
    explore_categories: &[
        HorrorSpot,
        PlaceOfWorship,
        NaturalFeature,
        Establishment,
        TouristAttraction,
    ],
    explore_radii_m: [3000.0, 8000.0, 15000.0],
    explore_limit: 20,
    excluded_name_fragments: &[],
};
