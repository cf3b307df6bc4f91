use crate::constants::MAX_PERMUTED_STOPS;
use crate::error::AppError;
use crate::models::{Coordinates, Poi, SuggestedRoute};
use crate::services::directions::{DirectionsProvider, WalkingRoute};
use crate::services::scatter::scatter_gather;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("no candidate stops to order")]
    NoCandidates,

    #[error("{0} free stops exceed the permutation limit of {max}", max = MAX_PERMUTED_STOPS)]
    TooManyStops(usize),

    #[error(
        "all {evaluated} orderings exceeded the {ceiling_minutes}-minute budget \
         ({over_budget} over budget, {failed} failed)"
    )]
    OverTimeBudget {
        evaluated: usize,
        over_budget: usize,
        failed: usize,
        ceiling_minutes: u32,
    },

    #[error("every directions call failed ({evaluated} orderings): {last_error}")]
    AllFailed { evaluated: usize, last_error: String },

    #[error("cancelled after {completed} of {submitted} orderings")]
    Cancelled { completed: usize, submitted: usize },
}

impl From<OptimizeError> for AppError {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::AllFailed { .. } => AppError::DirectionsApi(err.to_string()),
            OptimizeError::Cancelled { .. } => AppError::Cancelled(err.to_string()),
            OptimizeError::TooManyStops(_) => AppError::Internal(err.to_string()),
            OptimizeError::NoCandidates | OptimizeError::OverTimeBudget { .. } => {
                AppError::NoViableCandidates(err.to_string())
            }
        }
    }
}

/// Every ordering of `0..n` in lexicographic order. n! entries; callers keep
/// n within `MAX_PERMUTED_STOPS`.
pub fn permutation_indices(n: usize) -> Vec<Vec<usize>> {
    fn extend(prefix: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
        if prefix.len() == used.len() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..used.len() {
            if !used[i] {
                used[i] = true;
                prefix.push(i);
                extend(prefix, used, out);
                prefix.pop();
                used[i] = false;
            }
        }
    }

    let mut out = Vec::new();
    extend(&mut Vec::with_capacity(n), &mut vec![false; n], &mut out);
    out
}

/// Outcome of timing one ordering
enum Evaluation {
    Within(WalkingRoute),
    OverBudget(u32),
    Failed(AppError),
}

/// Picks the fastest ordering of a small stop set by asking the directions
/// gateway about every permutation.
pub struct RouteOptimizer {
    directions: Arc<dyn DirectionsProvider>,
    max_concurrent: usize,
}

impl RouteOptimizer {
    pub fn new(directions: Arc<dyn DirectionsProvider>, max_concurrent: usize) -> Self {
        RouteOptimizer {
            directions,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Order `stops` (and a fixed final `destination`, if any) from `start`
    /// into the shortest walk within `ceiling_minutes`.
    ///
    /// Orderings are timed concurrently; the winner is the strictly smallest
    /// duration, ties going to the earlier ordering in lexicographic order.
    /// If the token fires, the best of the orderings timed so far wins.
    pub async fn optimize(
        &self,
        name: &str,
        start: Coordinates,
        stops: &[Poi],
        destination: Option<&Poi>,
        ceiling_minutes: u32,
        cancel: &CancellationToken,
    ) -> std::result::Result<SuggestedRoute, OptimizeError> {
        self.optimize_with_tail(name, start, stops, &[], destination, ceiling_minutes, cancel)
            .await
    }

    /// Like [`optimize`](Self::optimize), with `tail` walked in its given
    /// order after the permuted `stops` and before the destination.
    #[allow(clippy::too_many_arguments)]
    pub async fn optimize_with_tail(
        &self,
        name: &str,
        start: Coordinates,
        stops: &[Poi],
        tail: &[Poi],
        destination: Option<&Poi>,
        ceiling_minutes: u32,
        cancel: &CancellationToken,
    ) -> std::result::Result<SuggestedRoute, OptimizeError> {
        if stops.is_empty() && tail.is_empty() && destination.is_none() {
            return Err(OptimizeError::NoCandidates);
        }
        if stops.len() > MAX_PERMUTED_STOPS {
            return Err(OptimizeError::TooManyStops(stops.len()));
        }

        let orderings: Vec<Vec<Poi>> = permutation_indices(stops.len())
            .into_iter()
            .map(|indices| {
                indices
                    .into_iter()
                    .map(|i| stops[i].clone())
                    .chain(tail.iter().cloned())
                    .chain(destination.cloned())
                    .collect()
            })
            .collect();

        let ceiling_seconds = f64::from(ceiling_minutes) * 60.0;
        let directions = &self.directions;

        let gathered = scatter_gather(
            orderings.iter(),
            Some(self.max_concurrent),
            cancel,
            |_, ordering| async move {
                let waypoints: Vec<Coordinates> = ordering.iter().map(|p| p.coordinates).collect();
                match directions.walking_route(&start, &waypoints).await {
                    Ok(route) if route.duration_seconds <= ceiling_seconds => {
                        Evaluation::Within(route)
                    }
                    Ok(route) => Evaluation::OverBudget(route.duration_minutes()),
                    Err(e) => Evaluation::Failed(e),
                }
            },
        )
        .await;

        let submitted = gathered.submitted;
        let cancelled = gathered.cancelled;
        let results = gathered.into_ordered();
        let completed = results.len();

        let mut best: Option<(usize, WalkingRoute)> = None;
        let mut over_budget = 0;
        let mut failed = 0;
        let mut last_error = None;

        for (index, evaluation) in results {
            match evaluation {
                Evaluation::Within(route) => {
                    let better = best
                        .as_ref()
                        .map_or(true, |(_, b)| route.duration_seconds < b.duration_seconds);
                    if better {
                        best = Some((index, route));
                    }
                }
                Evaluation::OverBudget(minutes) => {
                    over_budget += 1;
                    tracing::debug!(
                        ordering = index,
                        duration_min = minutes,
                        "Ordering {} over budget: {}min > {}min",
                        index,
                        minutes,
                        ceiling_minutes
                    );
                }
                Evaluation::Failed(e) => {
                    failed += 1;
                    tracing::debug!(ordering = index, "Directions call failed: {}", e);
                    last_error = Some(e);
                }
            }
        }

        let Some((index, route)) = best else {
            if cancelled {
                return Err(OptimizeError::Cancelled {
                    completed,
                    submitted,
                });
            }
            tracing::warn!(
                route = %name,
                evaluated = completed,
                over_budget,
                failed,
                "No ordering of {} fits within {}min",
                name,
                ceiling_minutes
            );
            if over_budget == 0 {
                return Err(OptimizeError::AllFailed {
                    evaluated: completed,
                    last_error: last_error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "no result".to_string()),
                });
            }
            return Err(OptimizeError::OverTimeBudget {
                evaluated: completed,
                over_budget,
                failed,
                ceiling_minutes,
            });
        };

        let minutes = route.duration_minutes();
        tracing::info!(
            route = %name,
            evaluated = completed,
            over_budget,
            failed,
            duration_min = minutes,
            "Best of {} orderings: #{} at {}min",
            completed,
            index,
            minutes
        );

        Ok(SuggestedRoute {
            name: format!("{} ({} min)", name, minutes),
            pois: orderings[index].clone(),
            total_duration_minutes: minutes,
            polyline: route.encoded_path,
        })
    }
}
