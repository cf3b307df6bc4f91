pub mod coordinates;
pub mod poi;
pub mod proposal;
pub mod route;
pub mod theme;

pub use coordinates::Coordinates;
pub use poi::{Poi, PoiCategory};
pub use proposal::{
    NavigationStep, ProposalResponse, RecalculateResponse, RouteProposal, UpdatedRoute,
};
pub use route::{
    CandidateCombination, RealtimeContext, RecalculateRequest, SuggestedRoute, SuggestionRequest,
};
pub use theme::{Scenario, Theme};
