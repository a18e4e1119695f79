//! Shared primitives for the StudyHub access-control core.
//!
//! Everything here is plain data: roles, permissions, the per-request
//! principal, and the decision type returned by the evaluator and the gate.

mod decision;
mod permission;
mod principal;
mod role;

pub use decision::{Decision, DenyReason};
pub use permission::Permission;
pub use principal::Principal;
pub use role::Role;
