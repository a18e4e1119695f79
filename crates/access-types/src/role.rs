use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of roles a principal can hold. The role is the sole source of
/// a principal's baseline permission set and is immutable once assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    User,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::User, Role::Viewer];

    /// Maps an untrusted role claim onto the closed set. Unrecognized values
    /// fall back to the lowest-privilege role instead of erroring.
    pub fn from_claim(raw: &str) -> Role {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "MANAGER" => Role::Manager,
            "USER" => Role::User,
            "VIEWER" => Role::Viewer,
            _ => Role::Viewer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_parsing_is_case_insensitive() {
        assert_eq!(Role::from_claim("admin"), Role::Admin);
        assert_eq!(Role::from_claim(" Manager "), Role::Manager);
        assert_eq!(Role::from_claim("USER"), Role::User);
    }

    #[test]
    fn unknown_claims_fall_back_to_viewer() {
        assert_eq!(Role::from_claim("superuser"), Role::Viewer);
        assert_eq!(Role::from_claim(""), Role::Viewer);
    }
}
