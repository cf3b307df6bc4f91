//! Food walks: cafes, bakeries and the small shops between them.
//!
//! Every role escalates the same way: its own categories close by, then any
//! store a little further out, then tourist attractions as a last resort.

use super::pipeline::Pick::{HighestRated, Nearest};
use super::pipeline::SearchCenter::{MidpointOfLastTwo, Origin, PreviousStop};
use super::pipeline::{role, tier, RoleStep, ScenarioPipeline, SearchTier, ThemeCatalog};
use crate::models::{PoiCategory::*, Scenario, Theme};

// Cafe hopping
const BOOK_OR_VARIETY: &[SearchTier] = &[
    tier(&[BookStore, VarietyStore], 1500.0, 10),
    tier(&[Store], 2500.0, 15),
    tier(&[TouristAttraction], 4000.0, 20),
];
const MAIN_CAFE: &[SearchTier] = &[
    tier(&[Cafe], 1000.0, 10),
    tier(&[Store], 2000.0, 15),
    tier(&[TouristAttraction], 3500.0, 20),
];
const PARK_OR_BAKERY: &[SearchTier] = &[
    tier(&[Park, Bakery], 800.0, 10),
    tier(&[TouristAttraction, Store], 1500.0, 15),
    tier(&[TouristAttraction], 2500.0, 20),
];

// Bakery tour
const FIRST_BAKERY: &[SearchTier] = &[
    tier(&[Bakery], 1500.0, 10),
    tier(&[Store], 2500.0, 15),
    tier(&[TouristAttraction], 4000.0, 20),
];
const SECOND_BAKERY: &[SearchTier] = &[
    tier(&[Bakery], 1200.0, 10),
    tier(&[Store], 2000.0, 15),
    tier(&[TouristAttraction], 3500.0, 20),
];
const RESTING_PARK: &[SearchTier] = &[
    tier(&[Park], 1000.0, 10),
    tier(&[TouristAttraction, Store], 1500.0, 15),
    tier(&[TouristAttraction], 2500.0, 20),
];

// Local gourmet
const LOCAL_CAFE: &[SearchTier] = &[
    tier(&[Cafe], 1200.0, 10),
    tier(&[Store], 2000.0, 15),
    tier(&[TouristAttraction], 3000.0, 20),
];
const LOCAL_RESTAURANT: &[SearchTier] = &[
    tier(&[Restaurant, Store], 1000.0, 10),
    tier(&[Cafe], 1800.0, 15),
    tier(&[TouristAttraction], 2500.0, 20),
];
const AFTER_MEAL: &[SearchTier] = &[
    tier(&[Park, TouristAttraction], 800.0, 10),
    tier(&[Store, VarietyStore], 1500.0, 15),
    tier(&[TouristAttraction], 2500.0, 20),
];

// Sweet journey
const SWEET_CAFE: &[SearchTier] = &[
    tier(&[Cafe], 1500.0, 10),
    tier(&[Store], 2500.0, 15),
    tier(&[TouristAttraction], 4000.0, 20),
];
const SWEET_SHOP: &[SearchTier] = &[
    tier(&[VarietyStore], 800.0, 10),
    tier(&[Store], 1500.0, 15),
    tier(&[TouristAttraction], 2500.0, 20),
];
const SWEET_FINALE: &[SearchTier] = &[
    tier(&[Cafe, Store], 1000.0, 10),
    tier(&[TouristAttraction], 1800.0, 15),
    tier(&[TouristAttraction], 3000.0, 20),
];

// Shortened pipelines ending at a destination
const CAFE_NEAR_START: &[SearchTier] = &[tier(&[Cafe], 1500.0, 10)];
const CAFE_NEAR_PREVIOUS: &[SearchTier] = &[tier(&[Cafe], 1000.0, 10)];
const BAKERY_NEAR_START: &[SearchTier] = &[tier(&[Bakery], 1500.0, 10)];
const CAFE_OR_BAKERY: &[SearchTier] = &[tier(&[Cafe, Bakery], 1000.0, 10)];
const RESTAURANT_NEAR_PREVIOUS: &[SearchTier] = &[tier(&[Restaurant, Store], 1000.0, 10)];
const SWEETS_NEAR_START: &[SearchTier] = &[tier(&[Cafe, Store], 1500.0, 10)];
const SWEETS_NEAR_PREVIOUS: &[SearchTier] = &[tier(&[Cafe, Store], 1000.0, 10)];

const CAFE_HOPPING: &[RoleStep] = &[
    role("book_or_variety_store", Origin, BOOK_OR_VARIETY, HighestRated, false),
    role("main_cafe", PreviousStop, MAIN_CAFE, Nearest, true),
    role("park_or_bakery", PreviousStop, PARK_OR_BAKERY, Nearest, false),
];
const CAFE_HOPPING_TO_DESTINATION: &[RoleStep] = &[
    role("first_cafe", Origin, CAFE_NEAR_START, HighestRated, true),
    role("second_cafe", PreviousStop, CAFE_NEAR_PREVIOUS, HighestRated, false),
];

const BAKERY_TOUR: &[RoleStep] = &[
    role("bakery_a", Origin, FIRST_BAKERY, HighestRated, true),
    role("bakery_b", PreviousStop, SECOND_BAKERY, HighestRated, false),
    role("resting_park", MidpointOfLastTwo, RESTING_PARK, Nearest, false),
];
const BAKERY_TOUR_TO_DESTINATION: &[RoleStep] = &[
    role("bakery", Origin, BAKERY_NEAR_START, HighestRated, true),
    role("cafe_or_bakery", PreviousStop, CAFE_OR_BAKERY, HighestRated, false),
];

const LOCAL_GOURMET: &[RoleStep] = &[
    role("cafe", Origin, LOCAL_CAFE, HighestRated, false),
    role("main_restaurant", PreviousStop, LOCAL_RESTAURANT, HighestRated, true),
    role("after_meal_spot", PreviousStop, AFTER_MEAL, Nearest, false),
];
const LOCAL_GOURMET_TO_DESTINATION: &[RoleStep] = &[
    role("cafe", Origin, CAFE_NEAR_START, HighestRated, false),
    role("restaurant", PreviousStop, RESTAURANT_NEAR_PREVIOUS, HighestRated, true),
];

const SWEET_JOURNEY: &[RoleStep] = &[
    role("cafe_a", Origin, SWEET_CAFE, HighestRated, true),
    role("variety_shop", PreviousStop, SWEET_SHOP, Nearest, false),
    role("sweet_finale", PreviousStop, SWEET_FINALE, Nearest, false),
];
const SWEET_JOURNEY_TO_DESTINATION: &[RoleStep] = &[
    role("sweet_spot_a", Origin, SWEETS_NEAR_START, HighestRated, true),
    role("sweet_spot_b", PreviousStop, SWEETS_NEAR_PREVIOUS, HighestRated, false),
];

pub static CATALOG: ThemeCatalog = ThemeCatalog {
    theme: Theme::Gourmet,
    scenarios: &[
        ScenarioPipeline {
            scenario: Scenario::CafeHopping,
            roles: CAFE_HOPPING,
            min_stops: 2,
            destination_roles: CAFE_HOPPING_TO_DESTINATION,
            destination_categories: &[Cafe, Park, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::BakeryTour,
            roles: BAKERY_TOUR,
            min_stops: 2,
            destination_roles: BAKERY_TOUR_TO_DESTINATION,
            destination_categories: &[Store, Cafe, Bakery],
        },
        ScenarioPipeline {
            scenario: Scenario::LocalGourmet,
            roles: LOCAL_GOURMET,
            min_stops: 2,
            destination_roles: LOCAL_GOURMET_TO_DESTINATION,
            destination_categories: &[Cafe, Store, TouristAttraction],
        },
        ScenarioPipeline {
            scenario: Scenario::SweetJourney,
            roles: SWEET_JOURNEY,
            min_stops: 2,
            destination_roles: SWEET_JOURNEY_TO_DESTINATION,
            destination_categories: &[Cafe, Store, VarietyStore],
        },
    ],
    explore_categories: &[Cafe, Bakery, VarietyStore, BookStore, Store, Park],
    explore_radii_m: [500.0, 1000.0, 1500.0],
    explore_limit: 20,
    excluded_name_fragments: &["McDonald's", "マクドナルド", "マック", "サモエドカフェ"],
};
