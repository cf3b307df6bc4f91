use crate::constants::{DISCOVERY_LONG_ROUTE_MINUTES, DISCOVERY_SHORT_ROUTE_MINUTES, MAX_PERMUTED_STOPS};
use crate::db::PoiRepository;
use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, Poi, RecalculateRequest, RouteProposal, SuggestedRoute, UpdatedRoute,
};
use crate::services::narrative::{continuation_fallback, NarrativeGenerator};
use crate::services::navigation;
use crate::services::route_optimizer::RouteOptimizer;
use crate::services::strategy::StrategyRegistry;
use crate::store::{ttl_from_hours, ProposalStore};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const RECALCULATED_ROUTE_NAME: &str = "Recalculated route";

/// Request-scoped working state of one recalculation
#[derive(Debug, Clone)]
pub struct RecalculationContext {
    pub original: RouteProposal,
    /// Unvisited stops of the original walk, in their original order
    pub remaining: Vec<Poi>,
    pub discoveries: Vec<Poi>,
    /// Discoveries then remaining stops, the free stops handed to the optimizer
    pub candidates: Vec<Poi>,
}

/// How many new spots to fold into a recalculated walk.
///
/// Longer original walks leave more room and fewer remaining stops leave
/// more room. At least one spot is always wanted.
pub fn discovery_count(original_minutes: u32, remaining: usize) -> usize {
    let max_new: usize = if original_minutes <= DISCOVERY_SHORT_ROUTE_MINUTES {
        2
    } else if original_minutes <= DISCOVERY_LONG_ROUTE_MINUTES {
        3
    } else {
        1
    };

    match remaining {
        0..=2 => max_new,
        3..=4 => max_new - 1,
        _ => 1,
    }
    .max(1)
}

/// Unvisited stops of a proposal, order preserved
pub fn prune_visited(original: &RouteProposal, visited: &HashSet<String>) -> Vec<Poi> {
    original
        .pois()
        .into_iter()
        .filter(|poi| !visited.contains(&poi.id))
        .collect()
}

/// Replace stops rebuilt from navigation steps with their full repository
/// records. A stop the repository cannot return keeps its step form.
pub async fn rehydrate(pois: &dyn PoiRepository, stops: Vec<Poi>) -> Vec<Poi> {
    let lookups = futures::future::join_all(stops.iter().map(|stop| pois.find_by_id(&stop.id))).await;

    stops
        .into_iter()
        .zip(lookups)
        .map(|(stop, lookup)| match lookup {
            Ok(Some(full)) => full,
            Ok(None) => {
                tracing::debug!(poi_id = %stop.id, "Stop no longer in repository, keeping step data");
                stop
            }
            Err(e) => {
                tracing::warn!(poi_id = %stop.id, "Stop lookup failed, keeping step data: {}", e);
                stop
            }
        })
        .collect()
}

/// Run one recalculation step unless the request is cancelled first
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    step: &str,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled(format!("recalculation stopped before {}", step))),
        result = work => result,
    }
}

pub struct RouteRecalculationService {
    store: Arc<dyn ProposalStore>,
    pois: Arc<dyn PoiRepository>,
    strategies: StrategyRegistry,
    optimizer: Arc<RouteOptimizer>,
    narrator: Arc<dyn NarrativeGenerator>,
    ceiling_minutes: u32,
    ttl_hours: u64,
}

impl RouteRecalculationService {
    pub fn new(
        store: Arc<dyn ProposalStore>,
        pois: Arc<dyn PoiRepository>,
        strategies: StrategyRegistry,
        optimizer: Arc<RouteOptimizer>,
        narrator: Arc<dyn NarrativeGenerator>,
        ceiling_minutes: u32,
        ttl_hours: u64,
    ) -> Self {
        RouteRecalculationService {
            store,
            pois,
            strategies,
            optimizer,
            narrator,
            ceiling_minutes,
            ttl_hours,
        }
    }

    pub async fn recalculate_route(
        &self,
        request: &RecalculateRequest,
        cancel: &CancellationToken,
    ) -> Result<UpdatedRoute> {
        request.validate().map_err(AppError::InvalidRequest)?;

        // Restore
        let original = until_cancelled(cancel, "restore", self.store.get(&request.proposal_id)).await?;
        let visited: HashSet<String> = request.visited_poi_ids.iter().cloned().collect();

        tracing::info!(
            proposal_id = %original.proposal_id,
            theme = %original.theme.as_str(),
            visited = visited.len(),
            "Recalculating route"
        );

        // Prune
        let remaining = prune_visited(&original, &visited);
        let mut remaining = until_cancelled(cancel, "prune", async {
            Ok(rehydrate(self.pois.as_ref(), remaining).await)
        })
        .await?;

        // Resolve the destination before discovery so neither list repeats it
        let destination = match request.destination {
            Some(coordinates) => Some(
                until_cancelled(
                    cancel,
                    "destination",
                    self.resolve_destination(&original, coordinates, &visited),
                )
                .await?,
            ),
            None => None,
        };
        if let Some(ref destination) = destination {
            remaining.retain(|poi| poi.id != destination.id);
        }

        // Discover
        let discoveries = until_cancelled(
            cancel,
            "discovery",
            self.discover(
                &original,
                request.current_location,
                &remaining,
                &visited,
                destination.as_ref(),
            ),
        )
        .await?;

        // Rebuild
        let mut context = RecalculationContext {
            candidates: discoveries.iter().chain(remaining.iter()).cloned().collect(),
            original,
            remaining,
            discoveries,
        };
        if context.candidates.is_empty() && destination.is_none() {
            return Err(AppError::NoViableCandidates(
                "every stop was visited and no new spots were found".to_string(),
            ));
        }

        // Discoveries and the next stops are reordered; later stops keep
        // their original order
        let (head, tail) = context
            .candidates
            .split_at(context.candidates.len().min(MAX_PERMUTED_STOPS));
        if !tail.is_empty() {
            tracing::debug!(
                permuted = head.len(),
                kept_in_order = tail.len(),
                "Too many stops to permute, keeping the last {} in order",
                tail.len()
            );
        }

        let route = self
            .optimizer
            .optimize_with_tail(
                RECALCULATED_ROUTE_NAME,
                request.current_location,
                head,
                tail,
                destination.as_ref(),
                self.ceiling_minutes,
                cancel,
            )
            .await?;

        // Re-narrate
        let updated = self
            .narrate(&context.original, &route, request, cancel)
            .await;

        self.write_back(&mut context.original, &updated).await;

        tracing::info!(
            proposal_id = %updated.proposal_id,
            stops = route.pois.len(),
            discoveries = context.discoveries.len(),
            duration_min = updated.estimated_duration_minutes,
            "Route recalculated"
        );
        Ok(updated)
    }

    async fn resolve_destination(
        &self,
        original: &RouteProposal,
        coordinates: Coordinates,
        visited: &HashSet<String>,
    ) -> Result<Poi> {
        let strategy = self.strategies.get(original.theme);
        strategy
            .resolve_destination(coordinates, strategy.explore_categories(), visited)
            .await
    }

    async fn discover(
        &self,
        original: &RouteProposal,
        current_location: Coordinates,
        remaining: &[Poi],
        visited: &HashSet<String>,
        destination: Option<&Poi>,
    ) -> Result<Vec<Poi>> {
        let search_location = match remaining.first() {
            Some(next) => current_location.midpoint(&next.coordinates),
            None => current_location,
        };

        let strategy = self.strategies.get(original.theme);
        let found = match strategy.explore_new_spots(search_location).await {
            Ok(found) => found,
            // Remaining stops or a destination still make a walk
            Err(e) if !remaining.is_empty() || destination.is_some() => {
                tracing::warn!("Discovery failed, keeping remaining stops only: {}", e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let known: HashSet<&str> = remaining
            .iter()
            .chain(destination)
            .map(|poi| poi.id.as_str())
            .collect();
        let wanted = discovery_count(original.estimated_duration_minutes, remaining.len());

        let discoveries: Vec<Poi> = found
            .into_iter()
            .filter(|poi| !known.contains(poi.id.as_str()) && !visited.contains(&poi.id))
            .take(wanted)
            .collect();

        tracing::debug!(
            wanted,
            found = discoveries.len(),
            remaining = remaining.len(),
            "New discoveries: {}",
            discoveries
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(discoveries)
    }

    async fn narrate(
        &self,
        original: &RouteProposal,
        route: &SuggestedRoute,
        request: &RecalculateRequest,
        cancel: &CancellationToken,
    ) -> UpdatedRoute {
        let hydrated = navigation::hydrate(&route.pois);

        let narrative = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.narrator.generate_title_and_story(
                route,
                original.theme,
                &request.realtime_context,
                Some(original.generated_story.as_str()),
            ) => match result {
                Ok(narrative) => Some(narrative),
                Err(e) => {
                    tracing::warn!(
                        proposal_id = %original.proposal_id,
                        "Re-narration failed, continuing previous story: {}",
                        e
                    );
                    None
                }
            },
        };

        let (title, story) = match narrative {
            Some(n) => (n.title, n.story),
            None => (
                original.title.clone(),
                continuation_fallback(&original.generated_story),
            ),
        };

        UpdatedRoute {
            proposal_id: original.proposal_id.clone(),
            title,
            estimated_duration_minutes: route.total_duration_minutes,
            estimated_distance_meters: hydrated.total_distance_meters,
            highlights: navigation::highlights(&route.pois),
            navigation_steps: hydrated.steps,
            route_polyline: route.polyline.clone(),
            generated_story: story,
        }
    }

    /// Overwrite the stored proposal so the next recalculation starts from
    /// here. A failed write is logged; the caller still gets the new route.
    async fn write_back(&self, original: &mut RouteProposal, updated: &UpdatedRoute) {
        original.title = updated.title.clone();
        original.estimated_duration_minutes = updated.estimated_duration_minutes;
        original.estimated_distance_meters = updated.estimated_distance_meters;
        original.display_highlights = updated.highlights.clone();
        original.navigation_steps = updated.navigation_steps.clone();
        original.route_polyline = updated.route_polyline.clone();
        original.generated_story = updated.generated_story.clone();

        if let Err(e) = self
            .store
            .put(original, ttl_from_hours(self.ttl_hours))
            .await
        {
            tracing::warn!(
                proposal_id = %original.proposal_id,
                "Failed to store recalculated route: {}",
                e
            );
        }
    }
}
