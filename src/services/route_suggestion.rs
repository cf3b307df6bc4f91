use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Poi, Scenario, SuggestedRoute, SuggestionRequest, Theme};
use crate::services::route_optimizer::RouteOptimizer;
use crate::services::scatter::scatter_gather;
use crate::services::strategy::{StrategyRegistry, ThemeStrategy};
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Parsed and checked form of a suggestion request
#[derive(Debug, Clone)]
pub struct SuggestionPlan {
    pub theme: Theme,
    pub scenarios: Vec<Scenario>,
    pub start: Coordinates,
    pub destination: Option<Coordinates>,
    pub ceiling_minutes: u32,
}

/// `"[Park Tour] Nature - Maruyama Park to Kamo River (42 min)"`
pub fn route_name(scenario: Scenario, pois: &[Poi], minutes: u32) -> String {
    let label = format!(
        "[{}] {}",
        scenario.display_name(),
        scenario.theme().display_name()
    );
    match (pois.first(), pois.last()) {
        (Some(first), Some(last)) if pois.len() > 1 => format!(
            "{} - {} to {} ({} min)",
            label, first.name, last.name, minutes
        ),
        (Some(only), _) => format!("{} - {} ({} min)", label, only.name, minutes),
        _ => format!("{} ({} min)", label, minutes),
    }
}

pub struct RouteSuggestionService {
    strategies: StrategyRegistry,
    optimizer: Arc<RouteOptimizer>,
    engine: EngineConfig,
}

impl RouteSuggestionService {
    pub fn new(
        strategies: StrategyRegistry,
        optimizer: Arc<RouteOptimizer>,
        engine: EngineConfig,
    ) -> Self {
        RouteSuggestionService {
            strategies,
            optimizer,
            engine,
        }
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// Resolve theme, scenarios and ceiling. Everything that can be rejected
    /// without touching a gateway is rejected here.
    pub fn plan(&self, request: &SuggestionRequest) -> Result<SuggestionPlan> {
        request.validate().map_err(AppError::InvalidRequest)?;

        let theme = Theme::from_str(&request.theme).map_err(AppError::InvalidRequest)?;
        let strategy = self.strategies.get(theme);

        let scenarios = match request.scenarios {
            None => strategy.available_scenarios(),
            Some(ref ids) => {
                let mut scenarios = Vec::with_capacity(ids.len());
                for id in ids {
                    let scenario = Scenario::from_str(id).map_err(AppError::InvalidRequest)?;
                    if scenario.theme() != theme {
                        return Err(AppError::InvalidRequest(format!(
                            "Scenario '{}' belongs to theme '{}', not '{}'",
                            id,
                            scenario.theme().as_str(),
                            theme.as_str()
                        )));
                    }
                    if !scenarios.contains(&scenario) {
                        scenarios.push(scenario);
                    }
                }
                scenarios
            }
        };

        Ok(SuggestionPlan {
            theme,
            scenarios,
            start: request.start,
            destination: request.destination,
            ceiling_minutes: self.engine.suggestion_ceiling(request.time_minutes),
        })
    }

    /// One route per successful combination across every requested scenario.
    /// Fails only when no scenario produced a route.
    pub async fn suggest_routes(
        &self,
        request: &SuggestionRequest,
        cancel: &CancellationToken,
    ) -> Result<(Theme, Vec<SuggestedRoute>)> {
        let plan = self.plan(request)?;
        let routes = self.suggest_for_plan(&plan, cancel).await?;
        Ok((plan.theme, routes))
    }

    pub async fn suggest_for_plan(
        &self,
        plan: &SuggestionPlan,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuggestedRoute>> {
        let strategy = self.strategies.get(plan.theme);

        tracing::info!(
            theme = %plan.theme.as_str(),
            scenarios = plan.scenarios.len(),
            ceiling_min = plan.ceiling_minutes,
            with_destination = plan.destination.is_some(),
            "Suggesting routes for {} scenarios",
            plan.scenarios.len()
        );

        let gathered = scatter_gather(
            plan.scenarios.iter().copied(),
            None,
            cancel,
            |_, scenario| async move {
                let result = self.suggest_for_scenario(strategy, scenario, plan, cancel).await;
                (scenario, result)
            },
        )
        .await;

        let cancelled = gathered.cancelled;
        let mut routes = Vec::new();
        let mut failures: Vec<(Scenario, AppError)> = Vec::new();

        for (_, (scenario, result)) in gathered.into_ordered() {
            match result {
                Ok(mut scenario_routes) => routes.append(&mut scenario_routes),
                Err(e) => {
                    tracing::warn!(
                        scenario = %scenario.as_str(),
                        "Scenario produced no route: {}",
                        e
                    );
                    failures.push((scenario, e));
                }
            }
        }

        if !routes.is_empty() {
            tracing::info!(
                theme = %plan.theme.as_str(),
                routes = routes.len(),
                failed_scenarios = failures.len(),
                "Suggested {} routes",
                routes.len()
            );
            return Ok(routes);
        }

        if cancelled && failures.len() < plan.scenarios.len() {
            return Err(AppError::Cancelled(format!(
                "cancelled with {} of {} scenarios reported",
                failures.len(),
                plan.scenarios.len()
            )));
        }

        Err(aggregate_failures(failures))
    }

    async fn suggest_for_scenario(
        &self,
        strategy: &ThemeStrategy,
        scenario: Scenario,
        plan: &SuggestionPlan,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuggestedRoute>> {
        let combinations = match plan.destination {
            Some(destination) => {
                strategy
                    .find_combinations_with_destination(scenario, plan.start, destination)
                    .await?
            }
            None => strategy.find_combinations(scenario, plan.start).await?,
        };

        let optimizer = &self.optimizer;
        let gathered = scatter_gather(
            combinations.iter(),
            None,
            cancel,
            |_, combination| async move {
                optimizer
                    .optimize(
                        scenario.as_str(),
                        plan.start,
                        &combination.stops,
                        combination.destination.as_ref(),
                        plan.ceiling_minutes,
                        cancel,
                    )
                    .await
            },
        )
        .await;

        let cancelled = gathered.cancelled;
        let mut routes = Vec::new();
        let mut last_error = None;
        for (_, result) in gathered.into_ordered() {
            match result {
                Ok(mut route) => {
                    route.name = route_name(scenario, &route.pois, route.total_duration_minutes);
                    routes.push(route);
                }
                Err(e) => last_error = Some(AppError::from(e)),
            }
        }

        if !routes.is_empty() {
            return Ok(routes);
        }
        match last_error {
            Some(e) => Err(e),
            None if cancelled => Err(AppError::Cancelled(format!(
                "scenario '{}' cancelled before any ordering was timed",
                scenario.as_str()
            ))),
            None => Err(AppError::NoViableCandidates(format!(
                "scenario '{}' produced no combinations",
                scenario.as_str()
            ))),
        }
    }
}

/// Collapse per-scenario failures into one error. When every scenario
/// failed on a gateway the first gateway error is kept as is.
fn aggregate_failures(failures: Vec<(Scenario, AppError)>) -> AppError {
    if failures.is_empty() {
        return AppError::NoViableCandidates("no scenarios to suggest".to_string());
    }

    let message = failures
        .iter()
        .map(|(scenario, e)| format!("scenario '{}': {}", scenario.as_str(), e))
        .collect::<Vec<_>>()
        .join("; ");

    if failures.iter().all(|(_, e)| e.is_upstream()) {
        tracing::error!("Every scenario failed upstream: {}", message);
        return failures
            .into_iter()
            .next()
            .map(|(_, e)| e)
            .unwrap_or_else(|| AppError::Internal(message));
    }

    AppError::NoViableCandidates(format!("all scenarios failed: [{}]", message))
}
