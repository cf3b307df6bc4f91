mod memory;
mod redis;

pub use memory::MemoryProposalStore;
pub use redis::RedisProposalStore;

use crate::constants::PROPOSAL_ID_PREFIX;
use crate::error::{AppError, Result};
use crate::models::{RouteProposal, SuggestedRoute, Theme};
use crate::services::navigation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

/// Proposal plus its absolute expiry, as written to a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProposal {
    pub proposal: RouteProposal,
    pub expire_at_unix_ms: i64,
}

impl StoredProposal {
    pub fn new(proposal: RouteProposal, ttl: Duration) -> Self {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        StoredProposal {
            proposal,
            expire_at_unix_ms: now_unix_ms().saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        now_unix_ms() >= self.expire_at_unix_ms
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self) -> Duration {
        let left = self.expire_at_unix_ms.saturating_sub(now_unix_ms());
        Duration::from_millis(u64::try_from(left).unwrap_or(0))
    }
}

fn now_unix_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn ttl_from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

pub fn new_proposal_id() -> String {
    format!("{}{}", PROPOSAL_ID_PREFIX, Uuid::new_v4())
}

/// Keyed, TTL-expiring storage for generated proposals.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Fetch a live proposal. Missing and expired ids are both `NotFound`.
    async fn get(&self, proposal_id: &str) -> Result<RouteProposal>;

    /// Insert or overwrite a proposal under its own id
    async fn put(&self, proposal: &RouteProposal, ttl: Duration) -> Result<()>;

    async fn health_check(&self) -> bool;

    fn backend_name(&self) -> &'static str;

    /// Render suggested routes as proposals and persist them.
    /// `titles` and `stories` are parallel to `routes`. Individual write
    /// failures are logged and skipped; failing every write is an error.
    async fn save(
        &self,
        routes: &[SuggestedRoute],
        theme: Theme,
        ttl_hours: u64,
        titles: &[String],
        stories: &[String],
    ) -> Result<Vec<RouteProposal>> {
        if titles.len() != routes.len() || stories.len() != routes.len() {
            return Err(AppError::Internal(format!(
                "proposal save got {} routes, {} titles, {} stories",
                routes.len(),
                titles.len(),
                stories.len()
            )));
        }

        let ttl = ttl_from_hours(ttl_hours);
        let proposals: Vec<RouteProposal> = routes
            .iter()
            .zip(titles.iter().zip(stories.iter()))
            .map(|(route, (title, story))| build_proposal(route, theme, title, story))
            .collect();

        let writes = futures::future::join_all(
            proposals.iter().map(|proposal| self.put(proposal, ttl)),
        )
        .await;

        let mut saved = Vec::with_capacity(proposals.len());
        let mut last_error = None;
        for (proposal, result) in proposals.into_iter().zip(writes) {
            match result {
                Ok(()) => saved.push(proposal),
                Err(e) => {
                    tracing::warn!(
                        proposal_id = %proposal.proposal_id,
                        "Failed to save proposal: {}",
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if saved.is_empty() => Err(e),
            _ => {
                tracing::info!(
                    backend = self.backend_name(),
                    ttl_hours,
                    "Saved {} proposals",
                    saved.len()
                );
                Ok(saved)
            }
        }
    }
}

pub fn build_proposal(
    route: &SuggestedRoute,
    theme: Theme,
    title: &str,
    story: &str,
) -> RouteProposal {
    let hydrated = navigation::hydrate(&route.pois);
    RouteProposal {
        proposal_id: new_proposal_id(),
        title: title.to_string(),
        estimated_duration_minutes: route.total_duration_minutes,
        estimated_distance_meters: hydrated.total_distance_meters,
        theme,
        display_highlights: navigation::highlights(&route.pois),
        navigation_steps: hydrated.steps,
        route_polyline: route.polyline.clone(),
        generated_story: story.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Poi, PoiCategory};

    fn route() -> SuggestedRoute {
        let at = |lat: f64| Coordinates::new(lat, 135.77).unwrap();
        SuggestedRoute {
            name: "Walk (40 min)".into(),
            pois: vec![
                Poi::new("a", "Cafe A", at(35.000), &[PoiCategory::Cafe], 4.1),
                Poi::new("b", "Park B", at(35.009), &[PoiCategory::Park], 4.5),
            ],
            total_duration_minutes: 40,
            polyline: "abc".into(),
        }
    }

    #[test]
    fn test_proposal_id_format() {
        let id = new_proposal_id();
        assert!(id.starts_with("prop_"));
        assert!(Uuid::parse_str(&id["prop_".len()..]).is_ok());
    }

    #[test]
    fn test_build_proposal() {
        let proposal = build_proposal(&route(), Theme::Gourmet, "Title", "Story");
        assert_eq!(proposal.display_highlights, vec!["Cafe A", "Park B"]);
        assert_eq!(proposal.estimated_duration_minutes, 40);
        assert_eq!(proposal.pois().len(), 2);
        // ~1km between the two stops
        assert!((900..1100).contains(&proposal.estimated_distance_meters));
    }

    #[test]
    fn test_stored_proposal_expiry() {
        let proposal = build_proposal(&route(), Theme::Gourmet, "t", "s");
        let live = StoredProposal::new(proposal.clone(), ttl_from_hours(2));
        assert!(!live.is_expired());
        assert!(live.remaining() > Duration::from_secs(7000));

        let dead = StoredProposal::new(proposal, Duration::ZERO);
        assert!(dead.is_expired());
        assert_eq!(dead.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_save_rejects_mismatched_lengths() {
        let store = MemoryProposalStore::new(10);
        let result = store
            .save(&[route()], Theme::Gourmet, 2, &[], &["s".to_string()])
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = MemoryProposalStore::new(10);
        let saved = store
            .save(
                &[route(), route()],
                Theme::Gourmet,
                2,
                &["T1".to_string(), "T2".to_string()],
                &["S1".to_string(), "S2".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert_ne!(saved[0].proposal_id, saved[1].proposal_id);

        let fetched = store.get(&saved[1].proposal_id).await.unwrap();
        assert_eq!(fetched.title, "T2");
        assert_eq!(fetched.generated_story, "S2");
    }
}
