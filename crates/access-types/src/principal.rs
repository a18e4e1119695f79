use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The authenticated identity behind a request, derived once from session
/// data and immutable for the request's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub authenticated: bool,
}

impl Principal {
    pub fn authenticated(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            authenticated: true,
        }
    }

    /// Placeholder principal for requests without a valid session. Carries
    /// the lowest-privilege role and fails every authentication check.
    pub fn anonymous() -> Self {
        Self {
            id: String::new(),
            role: Role::Viewer,
            authenticated: false,
        }
    }
}
