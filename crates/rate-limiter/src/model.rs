use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A named throttling policy. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatePolicy {
    pub window: Duration,
    pub max_requests: u32,
    /// Message surfaced to throttled callers; the machine-readable outcome
    /// lives in [`RateDecision`].
    pub message: String,
}

impl RatePolicy {
    pub fn new(window: Duration, max_requests: u32, message: impl Into<String>) -> Self {
        Self {
            window,
            max_requests,
            message: message.into(),
        }
    }
}

/// Outcome of a single counter check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateDecision {
    Allow { remaining: u32 },
    Throttled { retry_after_ms: u64, message: String },
}

/// Check result with the window metadata the HTTP layer surfaces as
/// rate-limit headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateCheck {
    pub decision: RateDecision,
    /// Ceiling of the policy that produced this check.
    pub limit: u32,
    /// Epoch milliseconds at which the current window resets.
    pub reset_at_ms: u64,
}

impl RateCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self.decision, RateDecision::Allow { .. })
    }
}

/// Observability snapshot of the window cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub current_size: usize,
    pub capacity: usize,
}

/// On-disk policy configuration (YAML).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyFile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub policies: Vec<PolicyEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub name: String,
    /// Humantime window, e.g. `"15m"` or `"60s"`.
    pub window: String,
    pub max_requests: u32,
    pub message: String,
}

fn default_version() -> u32 {
    1
}
