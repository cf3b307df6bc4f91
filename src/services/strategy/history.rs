//! History and culture walks: a highly rated anchor, then the closest
//! related sights around it.

use super::pipeline::Pick::{HighestRated, Nearest};
use super::pipeline::SearchCenter::{Anchor, Origin};
use super::pipeline::{role, tier, RoleStep, ScenarioPipeline, SearchTier, ThemeCatalog};
use crate::models::{PoiCategory::*, Scenario, Theme};

const TEMPLE: &[SearchTier] = &[
    tier(&[PlaceOfWorship], 1500.0, 20),
    tier(&[PlaceOfWorship], 3000.0, 25),
];
const TEMPLE_SURROUNDINGS: &[SearchTier] = &[
    tier(&[PlaceOfWorship, TouristAttraction], 1000.0, 20),
    tier(&[PlaceOfWorship, TouristAttraction], 2000.0, 25),
];

const MUSEUM: &[SearchTier] = &[
    tier(&[Museum, ArtGallery], 1500.0, 20),
    tier(&[Museum, ArtGallery], 3000.0, 25),
];
const MUSEUM_SURROUNDINGS: &[SearchTier] = &[
    tier(&[Museum, ArtGallery, TouristAttraction], 1000.0, 20),
    tier(&[Museum, ArtGallery, TouristAttraction], 2000.0, 25),
];

const LANDMARK: &[SearchTier] = &[
    tier(&[TouristAttraction], 1500.0, 20),
    tier(&[TouristAttraction], 3000.0, 25),
];
const OLD_TOWN_SURROUNDINGS: &[SearchTier] = &[
    tier(&[TouristAttraction, Establishment, BookStore], 1000.0, 20),
    tier(&[TouristAttraction, Establishment, BookStore], 2000.0, 25),
];

const CULTURAL_SPOT: &[SearchTier] = &[
    tier(&[TouristAttraction, Museum, BookStore, ArtGallery], 1500.0, 20),
    tier(&[TouristAttraction, Museum, BookStore, ArtGallery], 3000.0, 25),
];
const CULTURAL_SURROUNDINGS: &[SearchTier] = &[
    tier(&[TouristAttraction, Museum, BookStore, ArtGallery], 1000.0, 20),
    tier(&[TouristAttraction, Museum, BookStore, ArtGallery], 2000.0, 25),
];

/// Companions are the sights nearest the anchor, not nearest each other
const fn companion(name: &'static str, tiers: &'static [SearchTier], required: bool) -> RoleStep {
    role(name, Anchor, tiers, Nearest, required)
}

const TEMPLE_SHRINE: &[RoleStep] = &[
    role("main_temple", Origin, TEMPLE, HighestRated, true),
    companion("nearby_shrine", TEMPLE_SURROUNDINGS, true),
    companion("further_shrine", TEMPLE_SURROUNDINGS, false),
];

const MUSEUM_TOUR: &[RoleStep] = &[
    role("main_museum", Origin, MUSEUM, HighestRated, true),
    companion("nearby_gallery", MUSEUM_SURROUNDINGS, true),
    companion("further_gallery", MUSEUM_SURROUNDINGS, false),
];

const OLD_TOWN: &[RoleStep] = &[
    role("main_landmark", Origin, LANDMARK, HighestRated, true),
    companion("old_shop", OLD_TOWN_SURROUNDINGS, true),
    companion("old_street", OLD_TOWN_SURROUNDINGS, false),
];

const CULTURAL_WALK: &[RoleStep] = &[
    role("highlight", Origin, CULTURAL_SPOT, HighestRated, true),
    role("second_spot", Anchor, CULTURAL_SURROUNDINGS, Nearest, true),
    role("third_spot", Anchor, CULTURAL_SURROUNDINGS, Nearest, false),
];

pub static CATALOG: ThemeCatalog = ThemeCatalog {
    theme: Theme::HistoryAndCulture,
    scenarios: &[
        ScenarioPipeline {
            scenario: Scenario::TempleShrine,
            roles: TEMPLE_SHRINE,
            min_stops: 2,
            destination_roles: TEMPLE_SHRINE.split_at(2).0,
            destination_categories: &[PlaceOfWorship, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::MuseumTour,
            roles: MUSEUM_TOUR,
            min_stops: 2,
            destination_roles: MUSEUM_TOUR.split_at(2).0,
            destination_categories: &[Museum, ArtGallery, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::OldTown,
            roles: OLD_TOWN,
            min_stops: 2,
            destination_roles: OLD_TOWN.split_at(2).0,
            destination_categories: &[TouristAttraction, Establishment, BookStore],
        },
        ScenarioPipeline {
            scenario: Scenario::CulturalWalk,
            roles: CULTURAL_WALK,
            min_stops: 2,
            destination_roles: CULTURAL_WALK.split_at(2).0,
            destination_categories: &[TouristAttraction, Museum, BookStore, ArtGallery],
        },
    ],
    explore_categories: &[
        TouristAttraction,
        Museum,
        ArtGallery,
        PlaceOfWorship,
        BookStore,
    ],
    explore_radii_m: [500.0, 1000.0, 1500.0],
    explore_limit: 20,
    excluded_name_fragments: &[],
};
