use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use strollroute::config::EngineConfig;
use strollroute::db::PoiRepository;
use strollroute::models::{Coordinates, Poi, PoiCategory, RealtimeContext, SuggestedRoute, Theme};
use strollroute::services::directions::{DirectionsProvider, WalkingRoute};
use strollroute::services::narrative::{Narrative, NarrativeGenerator};
use strollroute::store::{MemoryProposalStore, ProposalStore};
use strollroute::{AppError, AppState, Result};

/// Walking speed used by the fake directions service
#[allow(dead_code)]
pub const METERS_PER_MINUTE: f64 = 80.0;

/// Shijo-Kawaramachi, Kyoto
#[allow(dead_code)]
pub fn kyoto_start() -> Coordinates {
    Coordinates::new(35.0041, 135.7681).unwrap()
}

#[allow(dead_code)]
pub fn poi(
    id: &str,
    name: &str,
    lat: f64,
    lng: f64,
    categories: &[PoiCategory],
    rating: f64,
) -> Poi {
    Poi::new(id, name, Coordinates::new(lat, lng).unwrap(), categories, rating)
}

/// A small walkable neighbourhood around the start with every category the
/// theme pipelines ask for
#[allow(dead_code)]
pub fn kyoto_pois() -> Vec<Poi> {
    use PoiCategory::*;
    vec![
        poi("park_maruyama", "Maruyama Park", 35.0036, 135.7806, &[Park], 4.5),
        poi("park_okazaki", "Okazaki Park", 35.0125, 135.7820, &[Park], 4.2),
        poi("river_kamo", "Kamo River", 35.0050, 135.7720, &[NaturalFeature, TouristAttraction], 4.6),
        poi("cafe_yasaka", "Yasaka Cafe", 35.0040, 135.7780, &[Cafe], 4.0),
        poi("cafe_kamo", "Kamogawa Cafe", 35.0060, 135.7700, &[Cafe], 4.4),
        poi("bakery_gion", "Gion Bakery", 35.0045, 135.7750, &[Bakery], 4.3),
        poi("sweets_gion", "Gion Sweets", 35.0030, 135.7745, &[Cafe, Bakery], 4.1),
        poi("restaurant_ponto", "Pontocho Kitchen", 35.0055, 135.7710, &[Restaurant], 4.2),
        poi("temple_kennin", "Kenninji Temple", 35.0008, 135.7737, &[PlaceOfWorship, Park], 4.4),
        poi("temple_chion", "Chion-in", 35.0053, 135.7830, &[PlaceOfWorship], 4.6),
        poi("shrine_yasaka", "Yasaka Shrine", 35.0037, 135.7785, &[PlaceOfWorship, TouristAttraction], 4.5),
        poi("museum_kyoto", "Kyoto Museum", 34.9900, 135.7730, &[Museum], 4.3),
        poi("gallery_gion", "Gion Gallery", 35.0020, 135.7760, &[ArtGallery], 4.0),
        poi("store_nishiki", "Nishiki Market", 35.0050, 135.7650, &[Store, TouristAttraction], 4.1),
        poi("books_sanjo", "Sanjo Books", 35.0090, 135.7690, &[BookStore, Store], 3.9),
        poi("haunted_well", "Old Well", 35.0010, 135.7760, &[HorrorSpot], 3.8),
        poi("mcd_shijo", "McDonald's Shijo", 35.0039, 135.7690, &[Cafe, Restaurant], 5.0),
        poi("smoking_shijo", "喫煙所", 35.0042, 135.7684, &[Cafe, Park], 5.0),
    ]
}

/// In-memory POI repository: category filter, radius filter, nearest first
#[allow(dead_code)]
pub struct StaticPoiRepository {
    pois: Vec<Poi>,
    pub searches: AtomicUsize,
    pub lookups: AtomicUsize,
    pub failing: AtomicBool,
    /// Searches numbered at or past this fail
    pub fail_after: AtomicUsize,
}

#[allow(dead_code)]
impl StaticPoiRepository {
    pub fn new(pois: Vec<Poi>) -> Self {
        StaticPoiRepository {
            pois,
            searches: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            fail_after: AtomicUsize::new(usize::MAX),
        }
    }

    pub fn kyoto() -> Self {
        Self::new(kyoto_pois())
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Let the next `n` searches succeed and fail every one after
    pub fn fail_after_next(&self, n: usize) {
        self.fail_after.store(self.searches() + n, Ordering::SeqCst);
    }
}

#[async_trait]
impl PoiRepository for StaticPoiRepository {
    async fn find_nearby(
        &self,
        center: &Coordinates,
        categories: &[PoiCategory],
        radius_meters: f64,
        limit: i64,
    ) -> Result<Vec<Poi>> {
        let number = self.searches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) || number >= self.fail_after.load(Ordering::SeqCst) {
            return Err(AppError::Internal("poi database unavailable".into()));
        }

        let mut found: Vec<(f64, Poi)> = self
            .pois
            .iter()
            .filter(|p| categories.is_empty() || p.has_any_category(categories))
            .map(|p| (p.distance_from(center), p.clone()))
            .filter(|(distance, _)| *distance <= radius_meters)
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

        Ok(found
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|(_, p)| p)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Poi>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal("poi database unavailable".into()));
        }
        Ok(self.pois.iter().find(|p| p.id == id).cloned())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Directions by straight-line path length at a fixed walking speed.
/// Tracks calls and the peak number of calls in flight.
#[allow(dead_code)]
pub struct WalkingDirections {
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
    pub failing: AtomicBool,
    delay: Duration,
}

#[allow(dead_code)]
impl WalkingDirections {
    pub fn new() -> Self {
        WalkingDirections {
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: Duration::from_millis(2),
        }
    }

    pub fn failing() -> Self {
        let directions = Self::new();
        directions.failing.store(true, Ordering::SeqCst);
        directions
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[allow(dead_code)]
pub fn path_meters(origin: &Coordinates, waypoints: &[Coordinates]) -> f64 {
    let mut total = 0.0;
    let mut previous = *origin;
    for waypoint in waypoints {
        total += previous.distance_meters_to(waypoint);
        previous = *waypoint;
    }
    total
}

#[async_trait]
impl DirectionsProvider for WalkingDirections {
    async fn walking_route(
        &self,
        origin: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<WalkingRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DirectionsApi("HTTP 503".into()));
        }

        let meters = path_meters(origin, waypoints);
        Ok(WalkingRoute {
            duration_seconds: meters / METERS_PER_MINUTE * 60.0,
            encoded_path: format!("path_{}", waypoints.len()),
        })
    }
}

/// Narrator whose output names the route and echoes any previous story
#[allow(dead_code)]
pub struct EchoNarrator;

#[async_trait]
impl NarrativeGenerator for EchoNarrator {
    async fn generate_title_and_story(
        &self,
        route: &SuggestedRoute,
        theme: Theme,
        context: &RealtimeContext,
        previous_story: Option<&str>,
    ) -> Result<Narrative> {
        let weather = context.weather_or_default();
        let time_of_day = context.time_of_day_or_default();
        let story = match previous_story {
            Some(previous) => format!("{} The walk goes on, {} {}.", previous, weather, time_of_day),
            None => format!("A {} walk, {} {}.", theme.as_str(), weather, time_of_day),
        };
        Ok(Narrative {
            title: format!("Story of {}", route.name),
            story,
        })
    }
}

#[allow(dead_code)]
pub struct FailingNarrator;

#[async_trait]
impl NarrativeGenerator for FailingNarrator {
    async fn generate_title_and_story(
        &self,
        _route: &SuggestedRoute,
        _theme: Theme,
        _context: &RealtimeContext,
        _previous_story: Option<&str>,
    ) -> Result<Narrative> {
        Err(AppError::NarrativeApi("quota exceeded".into()))
    }
}

#[allow(dead_code)]
pub fn test_engine() -> EngineConfig {
    EngineConfig {
        max_concurrent_directions: 3,
        ..EngineConfig::default()
    }
}

/// Full application state over in-memory fakes
#[allow(dead_code)]
pub fn test_state(
    repo: Arc<StaticPoiRepository>,
    directions: Arc<WalkingDirections>,
    narrator: Arc<dyn NarrativeGenerator>,
) -> Arc<AppState> {
    let store: Arc<dyn ProposalStore> = Arc::new(MemoryProposalStore::new(100));
    Arc::new(AppState::new(repo, store, directions, narrator, test_engine()))
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}
