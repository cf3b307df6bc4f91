use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories the theme pipelines search by. Stored POIs carry free-form
/// category strings; these are the ones the engine knows how to ask for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    // Food & shops
    Cafe,
    Bakery,
    Restaurant,
    BookStore,
    VarietyStore,
    Store,

    // Nature
    Park,
    NaturalFeature,

    // History & culture
    PlaceOfWorship,
    Museum,
    ArtGallery,
    TouristAttraction,
    Establishment,

    // Off-beat
    HorrorSpot,
}

impl PoiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::Cafe => "cafe",
            PoiCategory::Bakery => "bakery",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::BookStore => "book_store",
            PoiCategory::VarietyStore => "variety_store",
            PoiCategory::Store => "store",
            PoiCategory::Park => "park",
            PoiCategory::NaturalFeature => "natural_feature",
            PoiCategory::PlaceOfWorship => "place_of_worship",
            PoiCategory::Museum => "museum",
            PoiCategory::ArtGallery => "art_gallery",
            PoiCategory::TouristAttraction => "tourist_attraction",
            PoiCategory::Establishment => "establishment",
            PoiCategory::HorrorSpot => "horror_spot",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cafe" => Ok(PoiCategory::Cafe),
            "bakery" => Ok(PoiCategory::Bakery),
            "restaurant" => Ok(PoiCategory::Restaurant),
            "book_store" | "bookstore" => Ok(PoiCategory::BookStore),
            "variety_store" => Ok(PoiCategory::VarietyStore),
            "store" => Ok(PoiCategory::Store),
            "park" => Ok(PoiCategory::Park),
            "natural_feature" => Ok(PoiCategory::NaturalFeature),
            "place_of_worship" => Ok(PoiCategory::PlaceOfWorship),
            "museum" => Ok(PoiCategory::Museum),
            "art_gallery" => Ok(PoiCategory::ArtGallery),
            "tourist_attraction" => Ok(PoiCategory::TouristAttraction),
            "establishment" => Ok(PoiCategory::Establishment),
            "horror_spot" => Ok(PoiCategory::HorrorSpot),
            _ => Err(format!("Invalid POI category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub categories: Vec<String>,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_cell_id: Option<i32>,
}

// Identity is the id; two fetches of the same place compare equal.
impl PartialEq for Poi {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Poi {}

impl Poi {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinates,
        categories: &[PoiCategory],
        rating: f64,
    ) -> Self {
        Poi {
            id: id.into(),
            name: name.into(),
            coordinates,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            rating,
            url: None,
            grid_cell_id: None,
        }
    }

    pub fn has_category(&self, category: PoiCategory) -> bool {
        let wanted = category.as_str();
        self.categories.iter().any(|c| c == wanted)
    }

    pub fn has_any_category(&self, categories: &[PoiCategory]) -> bool {
        categories.iter().any(|c| self.has_category(*c))
    }

    /// Distance in meters from `point` to this POI
    pub fn distance_from(&self, point: &Coordinates) -> f64 {
        point.distance_meters_to(&self.coordinates)
    }
}
