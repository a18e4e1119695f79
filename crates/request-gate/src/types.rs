use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studyhub_access_types::{Decision, Permission, Principal};

use crate::errors::IdentityError;

/// Request-scoped facts the gate needs: the client identity inputs and
/// whatever session material the identity collaborator consumes.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub source_address: String,
    pub user_agent: String,
    pub session_token: Option<String>,
}

impl RequestContext {
    pub fn new(source_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            source_address: source_address.into(),
            user_agent: user_agent.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

/// External identity collaborator. `Ok(None)` means "no valid session" and
/// yields an anonymous principal; `Err` means the provider itself failed and
/// terminates the request before any other check runs.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, ctx: &RequestContext) -> Result<Option<Principal>, IdentityError>;
}

/// Permission requirement an endpoint declares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    Permission(Permission),
    AnyOf(Vec<Permission>),
    AllOf(Vec<Permission>),
    Resource {
        permission: Permission,
        owner_id: String,
    },
}

impl AccessRequirement {
    /// The permissions involved, for deny diagnostics.
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            AccessRequirement::Permission(p) => vec![*p],
            AccessRequirement::AnyOf(ps) | AccessRequirement::AllOf(ps) => ps.clone(),
            AccessRequirement::Resource { permission, .. } => vec![*permission],
        }
    }
}

/// Per-endpoint declaration of which checks apply, in which both stages are
/// optional: a login route is rate limited but unauthenticated, a cheap read
/// may skip throttling.
#[derive(Clone, Debug, Default)]
pub struct EndpointGuard {
    pub rate_policy: Option<String>,
    pub requirement: Option<AccessRequirement>,
}

impl EndpointGuard {
    /// Neither stage declared; the gate only resolves the principal.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn require(requirement: AccessRequirement) -> Self {
        Self {
            rate_policy: None,
            requirement: Some(requirement),
        }
    }

    pub fn permission(permission: Permission) -> Self {
        Self::require(AccessRequirement::Permission(permission))
    }

    pub fn with_rate_policy(mut self, policy: impl Into<String>) -> Self {
        self.rate_policy = Some(policy.into());
        self
    }
}

/// Terminal outcome of the gate for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Both stages passed; the business handler runs with this principal.
    Pass { principal: Principal },
    Reject(Rejection),
}

impl GateOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, GateOutcome::Pass { .. })
    }
}

/// Deny/throttle response material for the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// HTTP-style status: 401, 403, or 429.
    pub status: u16,
    /// Machine-readable decision; callers assert on this, not the message.
    pub decision: Decision,
    pub message: String,
    /// Permissions the endpoint required, for diagnostics on 403s.
    pub required: Vec<Permission>,
    /// Response headers to surface (rate-limit metadata on 429s).
    pub headers: Vec<(String, String)>,
}
