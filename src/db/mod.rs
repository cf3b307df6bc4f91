use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

mod poi_queries;
pub mod poi_repository;

pub use poi_repository::{is_excluded_name, PgPoiRepository, PoiRepository};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
