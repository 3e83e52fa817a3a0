//! Traceprint Core - domain model for username OSINT investigations
//!
//! This crate provides the foundational primitives:
//! - Investigation requests and immutable results
//! - Per-probe outcomes with explicit failure taxonomy
//! - Profile candidates and deduplicated aggregated profiles
//! - Risk assessment types and tunable thresholds
//! - The platform URL-template catalogue
//! - Audit record projection

pub mod audit;
pub mod outcome;
pub mod platforms;
pub mod request;
pub mod result;
pub mod risk;

pub use audit::*;
pub use outcome::*;
pub use platforms::*;
pub use request::*;
pub use result::*;
pub use risk::*;

/// Default global investigation timeout in seconds
pub const DEFAULT_GLOBAL_TIMEOUT_SECS: u64 = 300;

/// Maximum username length accepted in a request
pub const MAX_USERNAME_LEN: usize = 100;

/// Default TTL for memoized capability reachability checks, in seconds
pub const CAPABILITY_CACHE_TTL_SECS: u64 = 60;

/// Timeout for capability reachability probes, in seconds
pub const REACHABILITY_PROBE_TIMEOUT_SECS: u64 = 2;
