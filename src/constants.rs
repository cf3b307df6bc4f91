//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation,
//! see [`EngineConfig`](crate::config::EngineConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Directions / optimizer defaults ---

/// Maximum simultaneous in-flight directions calls per optimizer run.
/// Overridden by `ENGINE_MAX_CONCURRENT_DIRECTIONS`.
pub const DEFAULT_MAX_CONCURRENT_DIRECTIONS: usize = 5;
/// Duration ceiling (minutes) applied to suggested routes.
pub const DEFAULT_SUGGESTION_CEILING_MINUTES: u32 = 90;
/// Upper bound for any ceiling; also used for recalculated routes.
pub const DEFAULT_MAX_CEILING_MINUTES: u32 = 120;
/// Lower clamp for a caller-supplied time budget.
pub const MIN_CEILING_MINUTES: u32 = 15;
/// Largest set of free (non-fixed) stops the optimizer will permute.
/// 4 stops = 24 orderings.
pub const MAX_PERMUTED_STOPS: usize = 4;

// --- POI search defaults ---

/// Radius (meters) for resolving a destination coordinate to a real POI.
pub const DEFAULT_DESTINATION_SEARCH_RADIUS_METERS: f64 = 500.0;
/// Result limit for destination resolution.
pub const DEFAULT_DESTINATION_SEARCH_LIMIT: i64 = 10;
/// Unique POIs after which discovery stops widening its radius.
pub const DEFAULT_EXPLORE_TARGET_COUNT: usize = 15;
/// POI names dropped from every search result.
pub const EXCLUDED_POI_NAMES: &[&str] = &["喫煙所", "Smoking Area"];

// --- Proposal defaults ---

/// Proposal lifetime in the store. Overridden by `ENGINE_PROPOSAL_TTL_HOURS`.
pub const DEFAULT_PROPOSAL_TTL_HOURS: u64 = 2;
/// Prefix of generated proposal ids.
pub const PROPOSAL_ID_PREFIX: &str = "prop_";
/// Maximum entries for the in-memory proposal store.
pub const DEFAULT_MEMORY_STORE_MAX_ENTRIES: u64 = 10_000;

// --- Recalculation discovery policy ---

/// Original routes at or under this duration may gain up to 2 discoveries.
pub const DISCOVERY_SHORT_ROUTE_MINUTES: u32 = 90;
/// Original routes at or under this duration may gain up to 3 discoveries.
pub const DISCOVERY_LONG_ROUTE_MINUTES: u32 = 120;

// --- Narrative defaults ---

/// Weather assumed when the caller supplies no realtime context.
pub const DEFAULT_WEATHER: &str = "sunny";
/// Time of day assumed when the caller supplies no realtime context.
pub const DEFAULT_TIME_OF_DAY: &str = "daytime";
/// Sentence appended to the previous story when re-narration fails.
pub const STORY_CONTINUATION_FALLBACK: &str = "New discoveries are enriching your walk.";
/// Default Gemini model for narrative generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

// --- Request handling ---

/// Per-request deadline (seconds) before the cancellation token fires.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
