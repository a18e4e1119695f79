use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of an access check. `Throttled` is produced by the rate-limiting
/// stage, the other variants by the authorization stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny { reason: DenyReason },
    Throttled { retry_after_ms: u64 },
}

impl Decision {
    pub fn deny(reason: DenyReason) -> Self {
        Decision::Deny { reason }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Machine-readable denial reason, kept separate from any display message so
/// callers and tests can assert on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    InsufficientPermission,
    NotResourceOwner,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::InsufficientPermission => "insufficient_permission",
            DenyReason::NotResourceOwner => "not_resource_owner",
        };
        f.write_str(label)
    }
}
