use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: Option<String>, // Falls back to the in-memory proposal store
    pub mapbox_api_key: String,
    pub mapbox_base_url: Option<String>,
    pub gemini_api_key: Option<String>, // Template narrator when absent
    pub gemini_model: String,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cap on in-flight directions calls for one optimizer run
    pub max_concurrent_directions: usize,

    /// Duration ceiling (minutes) for suggested routes when the caller gives no budget
    pub suggestion_ceiling_minutes: u32,

    /// Hard ceiling (minutes); caller budgets are clamped to it and
    /// recalculated routes are held to it
    pub max_ceiling_minutes: u32,

    /// Proposal lifetime in hours
    pub proposal_ttl_hours: u64,

    /// Unique POIs at which discovery stops widening its radius
    pub explore_target_count: usize,

    /// Radius (meters) for snapping a destination coordinate to a POI
    pub destination_search_radius_m: f64,

    /// Result limit for destination resolution
    pub destination_search_limit: i64,

    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_directions: DEFAULT_MAX_CONCURRENT_DIRECTIONS,
            suggestion_ceiling_minutes: DEFAULT_SUGGESTION_CEILING_MINUTES,
            max_ceiling_minutes: DEFAULT_MAX_CEILING_MINUTES,
            proposal_ttl_hours: DEFAULT_PROPOSAL_TTL_HOURS,
            explore_target_count: DEFAULT_EXPLORE_TARGET_COUNT,
            destination_search_radius_m: DEFAULT_DESTINATION_SEARCH_RADIUS_METERS,
            destination_search_limit: DEFAULT_DESTINATION_SEARCH_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            max_concurrent_directions: env::var("ENGINE_MAX_CONCURRENT_DIRECTIONS")
                .unwrap_or_else(|_| defaults.max_concurrent_directions.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_MAX_CONCURRENT_DIRECTIONS")?,

            suggestion_ceiling_minutes: env::var("ENGINE_SUGGESTION_CEILING_MINUTES")
                .unwrap_or_else(|_| defaults.suggestion_ceiling_minutes.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_SUGGESTION_CEILING_MINUTES")?,

            max_ceiling_minutes: env::var("ENGINE_MAX_CEILING_MINUTES")
                .unwrap_or_else(|_| defaults.max_ceiling_minutes.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_MAX_CEILING_MINUTES")?,

            proposal_ttl_hours: env::var("ENGINE_PROPOSAL_TTL_HOURS")
                .unwrap_or_else(|_| defaults.proposal_ttl_hours.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_PROPOSAL_TTL_HOURS")?,

            explore_target_count: env::var("ENGINE_EXPLORE_TARGET_COUNT")
                .unwrap_or_else(|_| defaults.explore_target_count.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_EXPLORE_TARGET_COUNT")?,

            destination_search_radius_m: env::var("ENGINE_DESTINATION_SEARCH_RADIUS_M")
                .unwrap_or_else(|_| defaults.destination_search_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_DESTINATION_SEARCH_RADIUS_M")?,

            destination_search_limit: env::var("ENGINE_DESTINATION_SEARCH_LIMIT")
                .unwrap_or_else(|_| defaults.destination_search_limit.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_DESTINATION_SEARCH_LIMIT")?,

            request_timeout_secs: env::var("ENGINE_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_REQUEST_TIMEOUT_SECS")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_directions == 0 {
            return Err("ENGINE_MAX_CONCURRENT_DIRECTIONS must be at least 1".to_string());
        }
        if self.suggestion_ceiling_minutes > self.max_ceiling_minutes {
            return Err(
                "ENGINE_SUGGESTION_CEILING_MINUTES must not exceed ENGINE_MAX_CEILING_MINUTES"
                    .to_string(),
            );
        }
        if self.proposal_ttl_hours == 0 {
            return Err("ENGINE_PROPOSAL_TTL_HOURS must be at least 1".to_string());
        }
        Ok(())
    }

    /// Resolve the duration ceiling for a suggestion request.
    /// A caller budget is clamped into `[MIN_CEILING_MINUTES, max_ceiling_minutes]`.
    pub fn suggestion_ceiling(&self, time_minutes: Option<u32>) -> u32 {
        match time_minutes {
            Some(minutes) => minutes.clamp(MIN_CEILING_MINUTES, self.max_ceiling_minutes),
            None => self.suggestion_ceiling_minutes,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL").ok(),
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            engine: EngineConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
