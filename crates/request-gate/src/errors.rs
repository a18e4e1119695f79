use permission_catalog::CatalogError;
use rate_limiter::RateLimitError;
use thiserror::Error;

/// Startup and programmer errors surfaced by the gate. Per-request denials
/// are not errors; they come back as [`crate::GateOutcome::Reject`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("permission catalog verification failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

/// Failure inside the identity collaborator (session store down, malformed
/// token state). Distinct from "no session": that is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity provider failure: {0}")]
    Provider(String),
}
