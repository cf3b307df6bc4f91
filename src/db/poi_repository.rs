use crate::constants::EXCLUDED_POI_NAMES;
use crate::error::Result;
use crate::models::{Coordinates, Poi, PoiCategory};
use async_trait::async_trait;

/// Raw POI fields extracted from a database row, before validation.
pub(super) struct RawPoiRow {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
    pub url: Option<String>,
    pub grid_cell_id: Option<i32>,
}

impl RawPoiRow {
    /// Validate and convert. Rows with out-of-range coordinates are dropped
    /// rather than defaulted, since a POI at (0,0) would poison routing.
    pub fn into_poi(self) -> Option<Poi> {
        let coordinates = match Coordinates::new(self.lat, self.lng) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(
                    "Invalid coordinates for POI '{}' (id: {}): {}. Skipping.",
                    self.name,
                    self.id,
                    e
                );
                return None;
            }
        };

        let rating = self.rating.filter(|r| r.is_finite()).unwrap_or(0.0);

        Some(Poi {
            id: self.id,
            name: self.name,
            coordinates,
            categories: self.categories,
            rating,
            url: self.url,
            grid_cell_id: self.grid_cell_id,
        })
    }
}

/// True when a POI name is on the global exclusion list. Applied by the
/// strategies to every search result, whatever the backing repository.
pub fn is_excluded_name(name: &str) -> bool {
    EXCLUDED_POI_NAMES.iter().any(|excluded| name == *excluded)
}

#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// POIs within `radius_meters` of `center` carrying any of `categories`,
    /// nearest first. An empty category slice matches every POI.
    async fn find_nearby(
        &self,
        center: &Coordinates,
        categories: &[PoiCategory],
        radius_meters: f64,
        limit: i64,
    ) -> Result<Vec<Poi>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Poi>>;

    async fn health_check(&self) -> bool;
}

pub struct PgPoiRepository {
    pool: sqlx::PgPool,
}

impl PgPoiRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl PoiRepository for PgPoiRepository {
    async fn find_nearby(
        &self,
        center: &Coordinates,
        categories: &[PoiCategory],
        radius_meters: f64,
        limit: i64,
    ) -> Result<Vec<Poi>> {
        Ok(
            super::poi_queries::find_pois_nearby(&self.pool, center, categories, radius_meters, limit)
                .await?,
        )
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Poi>> {
        Ok(super::poi_queries::find_poi_by_id(&self.pool, id).await?)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}
