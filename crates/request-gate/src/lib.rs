//! Request gate: the composition point every StudyHub API operation passes
//! through.
//!
//! For each inbound request the gate resolves the principal via the external
//! identity collaborator, runs the endpoint's declared rate policy, then its
//! declared permission requirement, and returns a single pass/reject outcome
//! carrying an HTTP-style status, a message, and rate-limit headers where
//! applicable. Every decision is published as an audit event.

mod errors;
mod events;
mod gate;
mod types;

pub use errors::{GateError, IdentityError};
pub use events::{GateEvent, OutcomeKind};
pub use gate::RequestGate;
pub use types::{
    AccessRequirement, EndpointGuard, GateOutcome, IdentityResolver, Rejection, RequestContext,
};
