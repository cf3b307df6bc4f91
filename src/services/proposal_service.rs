use crate::error::Result;
use crate::models::{RealtimeContext, RouteProposal, SuggestedRoute, SuggestionRequest, Theme};
use crate::services::narrative::{fallback_narrative, Narrative, NarrativeGenerator};
use crate::services::route_suggestion::RouteSuggestionService;
use crate::store::ProposalStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Suggest, narrate and persist
pub struct ProposalService {
    suggestion: Arc<RouteSuggestionService>,
    narrator: Arc<dyn NarrativeGenerator>,
    store: Arc<dyn ProposalStore>,
    ttl_hours: u64,
}

impl ProposalService {
    pub fn new(
        suggestion: Arc<RouteSuggestionService>,
        narrator: Arc<dyn NarrativeGenerator>,
        store: Arc<dyn ProposalStore>,
        ttl_hours: u64,
    ) -> Self {
        ProposalService {
            suggestion,
            narrator,
            store,
            ttl_hours,
        }
    }

    pub async fn generate_proposals(
        &self,
        request: &SuggestionRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<RouteProposal>> {
        let (theme, routes) = self.suggestion.suggest_routes(request, cancel).await?;

        let narratives = futures::future::join_all(routes.iter().map(|route| {
            narrate_or_fallback(
                self.narrator.as_ref(),
                route,
                theme,
                &request.realtime_context,
                cancel,
            )
        }))
        .await;

        let (titles, stories): (Vec<String>, Vec<String>) = narratives
            .into_iter()
            .map(|n| (n.title, n.story))
            .unzip();

        self.store
            .save(&routes, theme, self.ttl_hours, &titles, &stories)
            .await
    }

    pub async fn get_proposal(&self, proposal_id: &str) -> Result<RouteProposal> {
        self.store.get(proposal_id).await
    }
}

/// Ask the narrator once; on failure or cancellation use the fallback text
async fn narrate_or_fallback(
    narrator: &dyn NarrativeGenerator,
    route: &SuggestedRoute,
    theme: Theme,
    context: &RealtimeContext,
    cancel: &CancellationToken,
) -> Narrative {
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = narrator.generate_title_and_story(route, theme, context, None) => Some(result),
    };

    match result {
        Some(Ok(narrative)) => narrative,
        Some(Err(e)) => {
            tracing::warn!(route = %route.name, "Narrative generation failed, using fallback: {}", e);
            fallback_narrative(route)
        }
        None => {
            tracing::warn!(route = %route.name, "Narrative cancelled, using fallback");
            fallback_narrative(route)
        }
    }
}
