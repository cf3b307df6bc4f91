use crate::error::{AppError, Result};
use crate::models::RouteProposal;
use crate::store::{ProposalStore, StoredProposal};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

/// Redis-backed proposal store. `ConnectionManager` is `Arc`-based
/// internally, so cloning it per call is a cheap atomic increment.
pub struct RedisProposalStore {
    connection: ConnectionManager,
}

impl RedisProposalStore {
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Store(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to Redis: {}", e)))?;

        tracing::info!("Redis proposal store connection established");

        Ok(RedisProposalStore { connection })
    }
}

fn proposal_key(proposal_id: &str) -> String {
    format!("proposal:{}", proposal_id)
}

#[async_trait]
impl ProposalStore for RedisProposalStore {
    async fn get(&self, proposal_id: &str) -> Result<RouteProposal> {
        let mut conn = self.connection.clone();
        let json: Option<String> = conn
            .get(proposal_key(proposal_id))
            .await
            .map_err(|e| AppError::Store(format!("Redis GET failed: {}", e)))?;

        let not_found =
            || AppError::NotFound(format!("proposal '{}' not found or expired", proposal_id));

        let Some(json) = json else {
            tracing::debug!("Proposal store miss: {}", proposal_id);
            return Err(not_found());
        };

        let stored: StoredProposal = serde_json::from_str(&json).map_err(|e| {
            AppError::Store(format!(
                "Failed to deserialize proposal {}: {}",
                proposal_id, e
            ))
        })?;

        if stored.is_expired() {
            tracing::debug!("Proposal {} past its deadline", proposal_id);
            return Err(not_found());
        }

        tracing::debug!("Proposal store hit: {}", proposal_id);
        Ok(stored.proposal)
    }

    async fn put(&self, proposal: &RouteProposal, ttl: Duration) -> Result<()> {
        let stored = StoredProposal::new(proposal.clone(), ttl);
        let json = serde_json::to_string(&stored)
            .map_err(|e| AppError::Store(format!("Failed to serialize proposal: {}", e)))?;

        // SET EX rejects 0
        let ttl_secs = ttl.as_secs().max(1);
        let mut conn = self.connection.clone();
        let _: () = conn
            .set_ex(proposal_key(&proposal.proposal_id), json, ttl_secs)
            .await
            .map_err(|e| AppError::Store(format!("Redis SET failed: {}", e)))?;

        tracing::debug!(
            "Stored proposal {} with TTL {}s",
            proposal.proposal_id,
            ttl_secs
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
