use crate::error::{AppError, Result};
use crate::models::RouteProposal;
use crate::store::{ProposalStore, StoredProposal};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-entry expiry: each proposal lives exactly as long as its own TTL.
struct ProposalExpiry;

impl Expiry<String, Arc<StoredProposal>> for ProposalExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Arc<StoredProposal>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.remaining())
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Arc<StoredProposal>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.remaining())
    }
}

/// In-memory proposal store backed by moka with per-entry TTL and bounded
/// capacity. All methods are `&self`.
pub struct MemoryProposalStore {
    proposals: Cache<String, Arc<StoredProposal>>,
}

impl MemoryProposalStore {
    pub fn new(max_capacity: u64) -> Self {
        let proposals = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(ProposalExpiry)
            .build();

        MemoryProposalStore { proposals }
    }
}

#[async_trait]
impl ProposalStore for MemoryProposalStore {
    async fn get(&self, proposal_id: &str) -> Result<RouteProposal> {
        match self.proposals.get(proposal_id).await {
            // moka evicts lazily; the stored deadline is authoritative
            Some(stored) if !stored.is_expired() => {
                tracing::debug!("Memory store hit for proposal: {}", proposal_id);
                Ok(stored.proposal.clone())
            }
            _ => {
                tracing::debug!("Memory store miss for proposal: {}", proposal_id);
                Err(AppError::NotFound(format!(
                    "proposal '{}' not found or expired",
                    proposal_id
                )))
            }
        }
    }

    async fn put(&self, proposal: &RouteProposal, ttl: Duration) -> Result<()> {
        let stored = Arc::new(StoredProposal::new(proposal.clone(), ttl));
        self.proposals
            .insert(proposal.proposal_id.clone(), stored)
            .await;
        tracing::debug!(
            "Memory stored proposal {} with TTL {}s",
            proposal.proposal_id,
            ttl.as_secs()
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
