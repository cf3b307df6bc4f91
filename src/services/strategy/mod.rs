//! Theme strategies: turn "theme + location" into candidate stop sets.
//!
//! Each theme is a static [`ThemeCatalog`]; one engine, [`ThemeStrategy`],
//! interprets any catalog against a POI repository.

pub mod gourmet;
pub mod history;
pub mod horror;
pub mod nature;
pub mod pipeline;

use crate::config::EngineConfig;
use crate::db::{is_excluded_name, PoiRepository};
use crate::error::{AppError, Result};
use crate::models::{CandidateCombination, Coordinates, Poi, PoiCategory, Scenario, Theme};
use pipeline::{Pick, RoleStep, SearchTier, ThemeCatalog};
use std::collections::HashSet;
use std::sync::Arc;

/// Dispatch table from theme to its catalog
pub fn catalog_for(theme: Theme) -> &'static ThemeCatalog {
    match theme {
        Theme::Gourmet => &gourmet::CATALOG,
        Theme::Nature => &nature::CATALOG,
        Theme::HistoryAndCulture => &history::CATALOG,
        Theme::Horror => &horror::CATALOG,
    }
}

/// Search knobs shared by every theme
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub explore_target_count: usize,
    pub destination_radius_m: f64,
    pub destination_limit: i64,
}

impl From<&EngineConfig> for SearchSettings {
    fn from(config: &EngineConfig) -> Self {
        SearchSettings {
            explore_target_count: config.explore_target_count,
            destination_radius_m: config.destination_search_radius_m,
            destination_limit: config.destination_search_limit,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings::from(&EngineConfig::default())
    }
}

#[derive(Clone)]
pub struct ThemeStrategy {
    catalog: &'static ThemeCatalog,
    pois: Arc<dyn PoiRepository>,
    settings: SearchSettings,
}

impl ThemeStrategy {
    pub fn new(theme: Theme, pois: Arc<dyn PoiRepository>, settings: SearchSettings) -> Self {
        ThemeStrategy {
            catalog: catalog_for(theme),
            pois,
            settings,
        }
    }

    pub fn theme(&self) -> Theme {
        self.catalog.theme
    }

    pub fn available_scenarios(&self) -> Vec<Scenario> {
        self.catalog.scenario_ids()
    }

    /// Categories characteristic of the theme, as searched by exploration
    pub fn explore_categories(&self) -> &'static [PoiCategory] {
        self.catalog.explore_categories
    }

    fn pipeline(&self, scenario: Scenario) -> Result<&'static pipeline::ScenarioPipeline> {
        self.catalog.pipeline(scenario).ok_or_else(|| {
            AppError::InvalidRequest(format!(
                "Scenario '{}' is not part of theme '{}'",
                scenario.as_str(),
                self.theme().as_str()
            ))
        })
    }

    /// Candidate stop sets for a free-ended walk from `origin`
    pub async fn find_combinations(
        &self,
        scenario: Scenario,
        origin: Coordinates,
    ) -> Result<Vec<CandidateCombination>> {
        let pipeline = self.pipeline(scenario)?;
        let stops = self
            .run_roles(origin, pipeline.roles, &HashSet::new(), true)
            .await?;

        let Some(stops) = stops else {
            return Err(AppError::NoViableCandidates(format!(
                "no anchor POI found for scenario '{}'",
                scenario.as_str()
            )));
        };
        if stops.len() < pipeline.min_stops {
            return Err(AppError::NoViableCandidates(format!(
                "scenario '{}' found {} of at least {} stops",
                scenario.as_str(),
                stops.len(),
                pipeline.min_stops
            )));
        }

        tracing::debug!(
            scenario = %scenario.as_str(),
            stops = stops.len(),
            "Combination: {}",
            names(&stops)
        );
        Ok(vec![CandidateCombination::new(scenario, stops)])
    }

    /// Candidate stop sets for a walk ending at the POI nearest `destination`
    pub async fn find_combinations_with_destination(
        &self,
        scenario: Scenario,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<CandidateCombination>> {
        let pipeline = self.pipeline(scenario)?;
        let destination_poi = self
            .resolve_destination(destination, pipeline.destination_categories, &HashSet::new())
            .await?;

        let exclude: HashSet<String> = HashSet::from([destination_poi.id.clone()]);
        let stops = self
            .run_roles(origin, pipeline.destination_roles, &exclude, false)
            .await?
            .unwrap_or_default();

        let combination = CandidateCombination::with_destination(scenario, stops, destination_poi);
        if combination.len() < 2 {
            return Err(AppError::NoViableCandidates(format!(
                "no intermediate stop found before destination '{}' for scenario '{}'",
                combination
                    .destination
                    .as_ref()
                    .map(|p| p.name.as_str())
                    .unwrap_or_default(),
                scenario.as_str()
            )));
        }

        tracing::debug!(
            scenario = %scenario.as_str(),
            stops = combination.stops.len(),
            "Combination with destination: {}",
            names(&combination.stops)
        );
        Ok(vec![combination])
    }

    /// Fresh POIs around `location`, widening the radius until the target
    /// count is reached. Deduplicated by id, nearest tier first.
    pub async fn explore_new_spots(&self, location: Coordinates) -> Result<Vec<Poi>> {
        let target = self.settings.explore_target_count;
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut last_error = None;

        for radius in self.catalog.explore_radii_m {
            let batch = match self
                .pois
                .find_nearby(
                    &location,
                    self.catalog.explore_categories,
                    radius,
                    self.catalog.explore_limit,
                )
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(radius_m = radius, "Explore search failed: {}", e);
                    last_error = Some(e);
                    continue;
                }
            };

            for poi in batch {
                if self.is_excluded(&poi) || !seen.insert(poi.id.clone()) {
                    continue;
                }
                found.push(poi);
            }

            tracing::debug!(
                theme = %self.theme().as_str(),
                radius_m = radius,
                found = found.len(),
                "Explored {}m: {} unique spots",
                radius,
                found.len()
            );
            if found.len() >= target {
                break;
            }
        }

        match last_error {
            Some(e) if found.is_empty() => Err(e),
            _ => Ok(found),
        }
    }

    /// Snap a coordinate to the nearest real POI, first among `categories`,
    /// then among any category
    pub async fn resolve_destination(
        &self,
        destination: Coordinates,
        categories: &'static [PoiCategory],
        exclude: &HashSet<String>,
    ) -> Result<Poi> {
        let mut category_sets: Vec<&'static [PoiCategory]> = Vec::with_capacity(2);
        if !categories.is_empty() {
            category_sets.push(categories);
        }
        category_sets.push(&[]);

        for category_set in category_sets {
            let tier = SearchTier {
                categories: category_set,
                radius_m: self.settings.destination_radius_m,
                limit: self.settings.destination_limit,
            };
            let candidates = self.search_tier(destination, &tier, exclude).await?;
            if let Some(poi) = Pick::Nearest.select(&candidates, &destination) {
                tracing::debug!(
                    poi_id = %poi.id,
                    "Destination resolved to '{}' ({:.0}m away)",
                    poi.name,
                    poi.distance_from(&destination)
                );
                return Ok(poi.clone());
            }
        }

        Err(AppError::NoViableCandidates(format!(
            "no POI within {}m of destination ({:.5}, {:.5})",
            self.settings.destination_radius_m, destination.lat, destination.lng
        )))
    }

    /// Run a role pipeline. `Ok(None)` means a required role came up empty
    /// (only when `enforce_required`); optional roles are skipped.
    async fn run_roles(
        &self,
        origin: Coordinates,
        roles: &[RoleStep],
        exclude: &HashSet<String>,
        enforce_required: bool,
    ) -> Result<Option<Vec<Poi>>> {
        let mut chosen: Vec<Poi> = Vec::with_capacity(roles.len());
        let mut taken = exclude.clone();

        for role in roles {
            let center = role.center.resolve(origin, &chosen);
            match self.run_role(role, center, &taken).await? {
                Some(poi) => {
                    taken.insert(poi.id.clone());
                    chosen.push(poi);
                }
                None if role.required && enforce_required => {
                    tracing::debug!(role = role.role, "Required role found nothing");
                    return Ok(None);
                }
                None => {
                    tracing::debug!(role = role.role, "Optional role found nothing, skipping");
                }
            }
        }

        Ok(Some(chosen))
    }

    /// Walk a role's tiers until one yields a candidate. A failing tier is
    /// logged and the next tier is tried; if every tier errors the last
    /// error is returned.
    async fn run_role(
        &self,
        role: &RoleStep,
        center: Coordinates,
        exclude: &HashSet<String>,
    ) -> Result<Option<Poi>> {
        let mut last_error = None;
        let mut any_succeeded = false;

        for (index, tier) in role.tiers.iter().enumerate() {
            match self.search_tier(center, tier, exclude).await {
                Ok(candidates) => {
                    any_succeeded = true;
                    if let Some(poi) = role.pick.select(&candidates, &center) {
                        tracing::debug!(
                            role = role.role,
                            tier = index,
                            poi_id = %poi.id,
                            "Role '{}' picked '{}' (tier {}, {} candidates)",
                            role.role,
                            poi.name,
                            index,
                            candidates.len()
                        );
                        return Ok(Some(poi.clone()));
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        role = role.role,
                        tier = index,
                        radius_m = tier.radius_m,
                        "Search tier failed: {}",
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !any_succeeded => Err(e),
            _ => {
                tracing::debug!(role = role.role, "All {} tiers exhausted", role.tiers.len());
                Ok(None)
            }
        }
    }

    async fn search_tier(
        &self,
        center: Coordinates,
        tier: &SearchTier,
        exclude: &HashSet<String>,
    ) -> Result<Vec<Poi>> {
        let pois = self
            .pois
            .find_nearby(&center, tier.categories, tier.radius_m, tier.limit)
            .await?;
        Ok(pois
            .into_iter()
            .filter(|poi| !exclude.contains(&poi.id) && !self.is_excluded(poi))
            .collect())
    }

    fn is_excluded(&self, poi: &Poi) -> bool {
        is_excluded_name(&poi.name) || self.catalog.excludes_name(&poi.name)
    }
}

fn names(pois: &[Poi]) -> String {
    pois.iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One strategy per theme, sharing a repository
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: Vec<ThemeStrategy>,
}

impl StrategyRegistry {
    pub fn new(pois: Arc<dyn PoiRepository>, settings: SearchSettings) -> Self {
        StrategyRegistry {
            strategies: Theme::ALL
                .iter()
                .map(|theme| ThemeStrategy::new(*theme, pois.clone(), settings))
                .collect(),
        }
    }

    pub fn get(&self, theme: Theme) -> &ThemeStrategy {
        // Built from Theme::ALL, so every theme is present
        self.strategies
            .iter()
            .find(|s| s.theme() == theme)
            .unwrap_or(&self.strategies[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_match_their_theme() {
        for theme in Theme::ALL {
            let catalog = catalog_for(theme);
            assert_eq!(catalog.theme, theme);
            assert!(!catalog.scenarios.is_empty());
            for pipeline in catalog.scenarios {
                assert_eq!(pipeline.scenario.theme(), theme, "{:?}", pipeline.scenario);
                assert!(!pipeline.roles.is_empty());
                assert!(pipeline.roles.len() <= crate::constants::MAX_PERMUTED_STOPS);
                assert!(!pipeline.destination_roles.is_empty());
                assert!(pipeline.destination_roles.len() <= 2);
                assert!(pipeline.min_stops >= 1 && pipeline.min_stops <= pipeline.roles.len());
                for role in pipeline.roles.iter().chain(pipeline.destination_roles) {
                    assert!(!role.tiers.is_empty(), "{} has no tiers", role.role);
                }
            }
        }
    }

    #[test]
    fn test_every_scenario_has_a_pipeline() {
        let mut covered = 0;
        for theme in Theme::ALL {
            covered += catalog_for(theme).scenarios.len();
        }
        assert_eq!(covered, 15);
    }

    #[test]
    fn test_gourmet_excludes_chains() {
        assert!(catalog_for(Theme::Gourmet).excludes_name("McDonald's Shijo"));
        assert!(!catalog_for(Theme::Nature).excludes_name("McDonald's Shijo"));
    }
}
