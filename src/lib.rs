// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::EngineConfig;
use db::PoiRepository;
use services::directions::DirectionsProvider;
use services::narrative::NarrativeGenerator;
use services::proposal_service::ProposalService;
use services::route_optimizer::RouteOptimizer;
use services::route_recalculation::RouteRecalculationService;
use services::route_suggestion::RouteSuggestionService;
use services::strategy::{SearchSettings, StrategyRegistry};
use std::sync::Arc;
use store::ProposalStore;

// App state for sharing across the application
pub struct AppState {
    pub poi_repo: Arc<dyn PoiRepository>,
    pub store: Arc<dyn ProposalStore>,
    pub suggestion: Arc<RouteSuggestionService>,
    pub proposals: ProposalService,
    pub recalculation: RouteRecalculationService,
    pub engine: EngineConfig,
}

impl AppState {
    /// Wire the engine around its four gateways
    pub fn new(
        poi_repo: Arc<dyn PoiRepository>,
        store: Arc<dyn ProposalStore>,
        directions: Arc<dyn DirectionsProvider>,
        narrator: Arc<dyn NarrativeGenerator>,
        engine: EngineConfig,
    ) -> Self {
        let strategies = StrategyRegistry::new(poi_repo.clone(), SearchSettings::from(&engine));
        let optimizer = Arc::new(RouteOptimizer::new(
            directions,
            engine.max_concurrent_directions,
        ));

        let suggestion = Arc::new(RouteSuggestionService::new(
            strategies.clone(),
            optimizer.clone(),
            engine.clone(),
        ));
        let proposals = ProposalService::new(
            suggestion.clone(),
            narrator.clone(),
            store.clone(),
            engine.proposal_ttl_hours,
        );
        let recalculation = RouteRecalculationService::new(
            store.clone(),
            poi_repo.clone(),
            strategies,
            optimizer,
            narrator,
            engine.max_ceiling_minutes,
            engine.proposal_ttl_hours,
        );

        AppState {
            poi_repo,
            store,
            suggestion,
            proposals,
            recalculation,
            engine,
        }
    }
}
