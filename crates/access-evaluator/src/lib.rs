//! Authorization evaluator: combines catalog lookups with ownership rules.
//!
//! Baseline checks (`authorize`, `authorize_any`, `authorize_all`) consult the
//! permission catalog only. Resource checks add the ownership override,
//! expressed as an ordered rule list ([`ResourceRule`]) so the precedence is a
//! visible sequence rather than nested conditionals.

use permission_catalog::role_has_permission;
use serde::{Deserialize, Serialize};
use studyhub_access_types::{Decision, DenyReason, Permission, Principal, Role};
use tracing::debug;

/// Stateless evaluator. A single instance is shared by the request gate; it
/// keeps no per-request state and needs no synchronization.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessEvaluator;

impl AccessEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Baseline check: the principal is authenticated and its role holds the
    /// permission.
    pub fn authorize(&self, principal: &Principal, permission: Permission) -> Decision {
        if !principal.authenticated {
            return self.denied(principal, &[permission], DenyReason::Unauthenticated);
        }
        if !role_has_permission(principal.role, permission) {
            return self.denied(principal, &[permission], DenyReason::InsufficientPermission);
        }
        Decision::Allow
    }

    /// Allows iff at least one of `permissions` passes. The empty list denies:
    /// an endpoint that declares no satisfiable permission admits nobody.
    pub fn authorize_any(&self, principal: &Principal, permissions: &[Permission]) -> Decision {
        if !principal.authenticated {
            return self.denied(principal, permissions, DenyReason::Unauthenticated);
        }
        if permissions
            .iter()
            .any(|p| role_has_permission(principal.role, *p))
        {
            Decision::Allow
        } else {
            self.denied(principal, permissions, DenyReason::InsufficientPermission)
        }
    }

    /// Allows iff every one of `permissions` passes. Used for compound and
    /// destructive operations; the empty list is vacuously allowed.
    pub fn authorize_all(&self, principal: &Principal, permissions: &[Permission]) -> Decision {
        if !principal.authenticated {
            return self.denied(principal, permissions, DenyReason::Unauthenticated);
        }
        if permissions
            .iter()
            .all(|p| role_has_permission(principal.role, *p))
        {
            Decision::Allow
        } else {
            self.denied(principal, permissions, DenyReason::InsufficientPermission)
        }
    }

    /// Ownership-aware check for a specific object instance. Permission
    /// possession is necessary but not sufficient for third-party resources;
    /// ownership or an elevated role is required on top.
    pub fn authorize_resource(
        &self,
        principal: &Principal,
        permission: Permission,
        resource_owner_id: &str,
    ) -> Decision {
        if !principal.authenticated {
            return self.denied(principal, &[permission], DenyReason::Unauthenticated);
        }
        let rule = resource_rule(principal, permission, resource_owner_id);
        let decision = rule.decision();
        if let Decision::Deny { reason } = decision {
            debug!(
                target: "access-evaluator",
                principal = %principal.id,
                role = %principal.role,
                permission = %permission,
                owner = resource_owner_id,
                rule = ?rule,
                reason = %reason,
                "resource access denied"
            );
        }
        decision
    }

    fn denied(
        &self,
        principal: &Principal,
        permissions: &[Permission],
        reason: DenyReason,
    ) -> Decision {
        debug!(
            target: "access-evaluator",
            principal = %principal.id,
            role = %principal.role,
            required = ?permissions.iter().map(Permission::as_str).collect::<Vec<_>>(),
            reason = %reason,
            "access denied"
        );
        Decision::deny(reason)
    }
}

/// The ownership override as an explicit rule sequence, evaluated top to
/// bottom. The first matching rule wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRule {
    /// Admin bypasses every further check.
    SuperUser,
    /// The role lacks the baseline permission; ownership cannot compensate.
    BaselineDenied,
    /// The principal owns the resource.
    Owner,
    /// Managers holding the permission act on resources they do not own.
    DelegatedManager,
    /// Capability present, ownership and delegation absent.
    Denied,
}

impl ResourceRule {
    pub fn decision(self) -> Decision {
        match self {
            ResourceRule::SuperUser | ResourceRule::Owner | ResourceRule::DelegatedManager => {
                Decision::Allow
            }
            ResourceRule::BaselineDenied => Decision::deny(DenyReason::InsufficientPermission),
            ResourceRule::Denied => Decision::deny(DenyReason::NotResourceOwner),
        }
    }
}

/// Picks the first applicable rule for an authenticated principal.
pub fn resource_rule(
    principal: &Principal,
    permission: Permission,
    resource_owner_id: &str,
) -> ResourceRule {
    if principal.role == Role::Admin {
        return ResourceRule::SuperUser;
    }
    if !role_has_permission(principal.role, permission) {
        return ResourceRule::BaselineDenied;
    }
    if principal.id == resource_owner_id {
        return ResourceRule::Owner;
    }
    if principal.role == Role::Manager {
        return ResourceRule::DelegatedManager;
    }
    ResourceRule::Denied
}
