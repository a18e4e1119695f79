use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use access_evaluator::AccessEvaluator;
use rate_limiter::{client_key, RateDecision, RateLimiter};
use studyhub_access_types::{Decision, DenyReason, Permission, Principal};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

use crate::errors::GateError;
use crate::events::{GateEvent, OutcomeKind};
use crate::types::{
    AccessRequirement, EndpointGuard, GateOutcome, IdentityResolver, Rejection, RequestContext,
};

const UNAUTHENTICATED_MESSAGE: &str = "Authentication required.";
const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
const NOT_OWNER_MESSAGE: &str = "You do not have access to this resource.";

/// One gate instance is constructed at process start and shared across
/// requests. Construction verifies the permission catalog so a broken table
/// aborts startup instead of silently mis-deciding.
pub struct RequestGate {
    identity: Arc<dyn IdentityResolver>,
    evaluator: AccessEvaluator,
    limiter: Arc<RateLimiter>,
    events: broadcast::Sender<GateEvent>,
}

impl RequestGate {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, GateError> {
        permission_catalog::verify_catalog()?;
        let (events, _rx) = broadcast::channel(128);
        Ok(Self {
            identity,
            evaluator: AccessEvaluator::new(),
            limiter,
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GateEvent> {
        self.events.subscribe()
    }

    /// Runs the gate against the wall clock.
    pub async fn check(
        &self,
        ctx: &RequestContext,
        guard: &EndpointGuard,
    ) -> Result<GateOutcome, GateError> {
        self.check_at(ctx, guard, epoch_ms()).await
    }

    /// Runs the gate at an explicit time, which keeps throttling behavior
    /// deterministic under test.
    pub async fn check_at(
        &self,
        ctx: &RequestContext,
        guard: &EndpointGuard,
        now_ms: u64,
    ) -> Result<GateOutcome, GateError> {
        let principal = match self.identity.resolve(ctx).await {
            Ok(Some(principal)) => principal,
            // No session: continue anonymously so unauthenticated endpoints
            // (login, signup) still get rate limited.
            Ok(None) => Principal::anonymous(),
            Err(err) => {
                warn!(
                    target: "request-gate",
                    source = %ctx.source_address,
                    "identity resolution failed: {err}"
                );
                let rejection = Rejection {
                    status: 401,
                    decision: Decision::deny(DenyReason::Unauthenticated),
                    message: UNAUTHENTICATED_MESSAGE.into(),
                    required: Vec::new(),
                    headers: Vec::new(),
                };
                self.publish(None, OutcomeKind::Unauthenticated, Vec::new(), guard);
                return Ok(GateOutcome::Reject(rejection));
            }
        };

        if let Some(policy_name) = &guard.rate_policy {
            let key = client_key(&ctx.source_address, &ctx.user_agent);
            let check = self.limiter.check(policy_name, &key, now_ms)?;
            if let RateDecision::Throttled {
                retry_after_ms,
                message,
            } = check.decision
            {
                let rejection = Rejection {
                    status: 429,
                    decision: Decision::Throttled { retry_after_ms },
                    message,
                    required: Vec::new(),
                    headers: throttle_headers(check.limit, check.reset_at_ms, retry_after_ms),
                };
                self.publish(
                    Some(&principal),
                    OutcomeKind::Throttled,
                    Vec::new(),
                    guard,
                );
                return Ok(GateOutcome::Reject(rejection));
            }
        }

        if let Some(requirement) = &guard.requirement {
            let decision = self.evaluate(&principal, requirement);
            if let Decision::Deny { reason } = decision {
                let (status, outcome, message) = match reason {
                    DenyReason::Unauthenticated => {
                        (401, OutcomeKind::Unauthenticated, UNAUTHENTICATED_MESSAGE)
                    }
                    DenyReason::InsufficientPermission => {
                        (403, OutcomeKind::Forbidden, FORBIDDEN_MESSAGE)
                    }
                    DenyReason::NotResourceOwner => (403, OutcomeKind::Forbidden, NOT_OWNER_MESSAGE),
                };
                let required = requirement.permissions();
                let rejection = Rejection {
                    status,
                    decision: Decision::deny(reason),
                    message: message.into(),
                    required: required.clone(),
                    headers: Vec::new(),
                };
                self.publish(Some(&principal), outcome, required, guard);
                return Ok(GateOutcome::Reject(rejection));
            }
        }

        self.publish(Some(&principal), OutcomeKind::Pass, Vec::new(), guard);
        Ok(GateOutcome::Pass { principal })
    }

    fn evaluate(&self, principal: &Principal, requirement: &AccessRequirement) -> Decision {
        match requirement {
            AccessRequirement::Permission(permission) => {
                self.evaluator.authorize(principal, *permission)
            }
            AccessRequirement::AnyOf(permissions) => {
                self.evaluator.authorize_any(principal, permissions)
            }
            AccessRequirement::AllOf(permissions) => {
                self.evaluator.authorize_all(principal, permissions)
            }
            AccessRequirement::Resource {
                permission,
                owner_id,
            } => self
                .evaluator
                .authorize_resource(principal, *permission, owner_id),
        }
    }

    fn publish(
        &self,
        principal: Option<&Principal>,
        outcome: OutcomeKind,
        required: Vec<Permission>,
        guard: &EndpointGuard,
    ) {
        if self.events.receiver_count() == 0 {
            return;
        }
        let event = GateEvent {
            request_id: Uuid::new_v4(),
            principal_id: principal
                .filter(|p| p.authenticated)
                .map(|p| p.id.clone()),
            outcome,
            required,
            rate_policy: guard.rate_policy.clone(),
            timestamp: SystemTime::now(),
        };
        if let Err(err) = self.events.send(event) {
            warn!(target: "request-gate", "failed to publish gate event: {err}");
        }
    }
}

fn throttle_headers(limit: u32, reset_at_ms: u64, retry_after_ms: u64) -> Vec<(String, String)> {
    vec![
        ("X-RateLimit-Limit".into(), limit.to_string()),
        ("X-RateLimit-Remaining".into(), "0".into()),
        ("X-RateLimit-Reset".into(), (reset_at_ms / 1000).to_string()),
        (
            "Retry-After".into(),
            ((retry_after_ms + 999) / 1000).to_string(),
        ),
    ]
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
