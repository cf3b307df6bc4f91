pub mod directions;
pub mod mapbox;
pub mod narrative;
pub mod navigation;
pub mod proposal_service;
pub mod route_optimizer;
pub mod route_recalculation;
pub mod route_suggestion;
pub mod scatter;
pub mod strategy;
