use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use studyhub_access_types::Permission;
use uuid::Uuid;

/// Audit event emitted for every gate decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateEvent {
    pub request_id: Uuid,
    /// Empty for anonymous principals.
    pub principal_id: Option<String>,
    pub outcome: OutcomeKind,
    pub required: Vec<Permission>,
    pub rate_policy: Option<String>,
    pub timestamp: SystemTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Pass,
    Unauthenticated,
    Forbidden,
    Throttled,
}
