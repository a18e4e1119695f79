//! Fixed-window request throttling keyed by client identity.
//!
//! Counters are bucketed per `(client key, policy, window index)` and stored
//! in a bounded LRU cache with an absolute per-entry time-to-live, so memory
//! stays bounded no matter how many distinct clients show up.
//!
//! The scheme is a fixed-window counter, not a sliding window: a client can
//! burst up to twice the nominal ceiling across a window boundary. The same
//! goes for wall-clock regressions, which make stale-looking window keys.
//! Both are accepted tradeoffs of the simple scheme; a sliding window or
//! token bucket would tighten them at the cost of more state per key.

mod defaults;
mod errors;
mod limiter;
mod loader;
mod model;

pub use defaults::default_policies;
pub use errors::RateLimitError;
pub use limiter::{client_key, RateLimiter, RateLimiterOptions};
pub use loader::{load_policies, parse_policy_file};
pub use model::{CacheStats, PolicyEntry, PolicyFile, RateCheck, RateDecision, RatePolicy};
