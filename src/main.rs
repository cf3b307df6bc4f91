use axum::Router;
use std::sync::Arc;
use strollroute::config::Config;
use strollroute::constants::DEFAULT_MEMORY_STORE_MAX_ENTRIES;
use strollroute::db::{PgPoiRepository, PoiRepository};
use strollroute::services::directions::DirectionsProvider;
use strollroute::services::mapbox::{AuthMode, MapboxClient};
use strollroute::services::narrative::{GeminiClient, NarrativeGenerator, TemplateNarrator};
use strollroute::store::{MemoryProposalStore, ProposalStore, RedisProposalStore};
use strollroute::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strollroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting StrollRoute API server");
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = strollroute::db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations completed");

    // Proposal store: try Redis, fall back to in-memory
    let store: Arc<dyn ProposalStore> = if let Some(ref redis_url) = config.redis_url {
        tracing::info!("Connecting to Redis proposal store...");
        match RedisProposalStore::new(redis_url).await {
            Ok(redis_store) => Arc::new(redis_store),
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory proposal store.",
                    e
                );
                Arc::new(MemoryProposalStore::new(DEFAULT_MEMORY_STORE_MAX_ENTRIES))
            }
        }
    } else {
        tracing::info!("Redis URL not configured. Using in-memory proposal store.");
        Arc::new(MemoryProposalStore::new(DEFAULT_MEMORY_STORE_MAX_ENTRIES))
    };

    // Gateways
    let poi_repo: Arc<dyn PoiRepository> = Arc::new(PgPoiRepository::new(db_pool));
    let directions: Arc<dyn DirectionsProvider> = if let Some(ref base_url) = config.mapbox_base_url {
        Arc::new(MapboxClient::with_config(
            config.mapbox_api_key.clone(),
            base_url.clone(),
            AuthMode::BearerHeader,
        ))
    } else {
        Arc::new(MapboxClient::new(config.mapbox_api_key.clone()))
    };
    let narrator: Arc<dyn NarrativeGenerator> = match config.gemini_api_key {
        Some(ref api_key) => {
            tracing::info!(model = %config.gemini_model, "Using Gemini narrator");
            Arc::new(GeminiClient::new(api_key.clone(), config.gemini_model.clone()))
        }
        None => {
            tracing::info!("GEMINI_API_KEY not set. Using template narrator.");
            Arc::new(TemplateNarrator)
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(
        poi_repo,
        store,
        directions,
        narrator,
        config.engine.clone(),
    ));

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", strollroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
