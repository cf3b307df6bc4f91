//! Green walks: parks, water and temple gardens, with a cafe for a break.

use super::pipeline::Pick::{HighestRated, Nearest, PreferCategory};
use super::pipeline::SearchCenter::{Origin, PreviousStop};
use super::pipeline::{role, tier, RoleStep, ScenarioPipeline, SearchTier, ThemeCatalog};
use crate::models::{PoiCategory::*, Scenario, Theme};

// Park tour
const MAIN_PARK: &[SearchTier] = &[
    tier(&[Park, TouristAttraction], 1500.0, 10),
    tier(&[Park, NaturalFeature, TouristAttraction], 3000.0, 15),
];
const PARK_CAFE: &[SearchTier] = &[
    tier(&[Bakery, Cafe], 800.0, 5),
    tier(&[Bakery, Cafe, Store], 1500.0, 10),
];
const OTHER_NATURE: &[SearchTier] = &[
    tier(&[Park, NaturalFeature], 1000.0, 10),
    tier(&[Park, NaturalFeature], 2000.0, 15),
];

// Riverside
const RIVERSIDE_CAFE: &[SearchTier] = &[
    tier(&[Cafe], 1000.0, 5),
    tier(&[Cafe, Bakery], 2000.0, 10),
];
const RIVER: &[SearchTier] = &[
    tier(&[NaturalFeature, TouristAttraction], 1500.0, 10),
    tier(&[NaturalFeature, TouristAttraction, Park], 3000.0, 15),
];
const RIVERSIDE_PARK: &[SearchTier] = &[
    tier(&[Park], 800.0, 5),
    tier(&[Park, NaturalFeature], 1500.0, 10),
];

// Temples and greenery
const TEMPLE_GARDEN: &[SearchTier] = &[
    tier(&[PlaceOfWorship], 1500.0, 10),
    tier(&[PlaceOfWorship], 3000.0, 15),
];
const OPEN_PARK: &[SearchTier] = &[
    tier(&[Park, TouristAttraction], 1000.0, 10),
    tier(&[Park, NaturalFeature, TouristAttraction], 2000.0, 15),
];
const NEARBY_SHOP: &[SearchTier] = &[
    tier(&[Store, TouristAttraction], 800.0, 5),
    tier(&[Store, Cafe, TouristAttraction], 1500.0, 10),
];

// Shortened pipelines ending at a destination
const PARK_NEAR_START: &[SearchTier] = &[tier(&[Park], 1500.0, 10)];
const RIVER_NEAR_START: &[SearchTier] = &[tier(&[NaturalFeature, TouristAttraction], 1500.0, 5)];
const TEMPLE_NEAR_START: &[SearchTier] = &[tier(&[PlaceOfWorship], 1500.0, 5)];
const PARK_NEAR_PREVIOUS: &[SearchTier] = &[tier(&[Park], 1000.0, 5)];

const PARK_TOUR: &[RoleStep] = &[
    role("main_park", Origin, MAIN_PARK, HighestRated, true),
    role("park_cafe", PreviousStop, PARK_CAFE, Nearest, false),
    role("other_nature", PreviousStop, OTHER_NATURE, Nearest, false),
];
const PARK_TOUR_TO_DESTINATION: &[RoleStep] = &[
    role("park", Origin, PARK_NEAR_START, HighestRated, true),
    role("cafe", PreviousStop, PARK_CAFE, Nearest, false),
];

const RIVERSIDE: &[RoleStep] = &[
    role("cafe", Origin, RIVERSIDE_CAFE, HighestRated, false),
    role("river", PreviousStop, RIVER, Nearest, true),
    role("riverside_park", PreviousStop, RIVERSIDE_PARK, Nearest, false),
];
const RIVERSIDE_TO_DESTINATION: &[RoleStep] = &[
    role("river", Origin, RIVER_NEAR_START, HighestRated, true),
    role("riverside_park", PreviousStop, PARK_NEAR_PREVIOUS, Nearest, false),
];

const TEMPLE_NATURE: &[RoleStep] = &[
    role("temple_garden", Origin, TEMPLE_GARDEN, PreferCategory(Park), true),
    role("open_park", PreviousStop, OPEN_PARK, HighestRated, false),
    role("nearby_shop", PreviousStop, NEARBY_SHOP, Nearest, false),
];
const TEMPLE_NATURE_TO_DESTINATION: &[RoleStep] = &[
    role("temple", Origin, TEMPLE_NEAR_START, HighestRated, true),
    role("park", PreviousStop, PARK_NEAR_PREVIOUS, Nearest, false),
];

pub static CATALOG: ThemeCatalog = ThemeCatalog {
    theme: Theme::Nature,
    scenarios: &[
        ScenarioPipeline {
            scenario: Scenario::ParkTour,
            roles: PARK_TOUR,
            min_stops: 2,
            destination_roles: PARK_TOUR_TO_DESTINATION,
            destination_categories: &[Park, NaturalFeature, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::Riverside,
            roles: RIVERSIDE,
            min_stops: 2,
            destination_roles: RIVERSIDE_TO_DESTINATION,
            destination_categories: &[NaturalFeature, Park, Cafe],
        },
        ScenarioPipeline {
            scenario: Scenario::TempleNature,
            roles: TEMPLE_NATURE,
            min_stops: 2,
            destination_roles: TEMPLE_NATURE_TO_DESTINATION,
            destination_categories: &[PlaceOfWorship, Park, TouristAttraction],
        },
    ],
    explore_categories: &[Park, NaturalFeature, TouristAttraction, Cafe, Bakery],
    explore_radii_m: [500.0, 1000.0, 1500.0],
    explore_limit: 20,
    excluded_name_fragments: &[],
};
