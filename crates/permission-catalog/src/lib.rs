//! Static mapping from roles to the permissions they hold.
//!
//! The catalog is the single source of truth for baseline capability: the
//! evaluator never consults anything else. Admin's entry is `Permission::ALL`,
//! so the super-user superset invariant holds by construction;
//! [`verify_catalog`] re-asserts it at startup so the gate can refuse to come
//! up on a broken table.

use studyhub_access_types::{Permission, Role};
use thiserror::Error;

/// Baseline read surface shared by every role.
const VIEWER_PERMISSIONS: &[Permission] = &[
    Permission::ReadProject,
    Permission::ReadStudy,
    Permission::ReadDocument,
    Permission::ViewReports,
];

const USER_PERMISSIONS: &[Permission] = &[
    Permission::ReadProject,
    Permission::CreateProject,
    Permission::UpdateProject,
    Permission::ReadStudy,
    Permission::CreateStudy,
    Permission::UpdateStudy,
    Permission::ReadDocument,
    Permission::UploadDocument,
    Permission::GenerateContent,
    Permission::ViewReports,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ReadUser,
    Permission::CreateUser,
    Permission::UpdateUser,
    Permission::ReadProject,
    Permission::CreateProject,
    Permission::UpdateProject,
    Permission::DeleteProject,
    Permission::ReadStudy,
    Permission::CreateStudy,
    Permission::UpdateStudy,
    Permission::DeleteStudy,
    Permission::ReadDocument,
    Permission::UploadDocument,
    Permission::DeleteDocument,
    Permission::GenerateContent,
    Permission::ViewReports,
];

const ADMIN_PERMISSIONS: &[Permission] = &Permission::ALL;

/// Catalog violations surfaced by [`verify_catalog`]. These are programmer
/// errors: the table is compiled in, so any hit here must abort startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("role {role} has an empty permission set")]
    EmptyRoleSet { role: Role },
    #[error("role {role} lists {permission} more than once")]
    DuplicateEntry { role: Role, permission: Permission },
    #[error("role {role} holds {permission} but ADMIN does not")]
    AdminNotSuperset { role: Role, permission: Permission },
}

/// Permissions held by `role`. Pure and total over the closed role set.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Manager => MANAGER_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
        Role::Viewer => VIEWER_PERMISSIONS,
    }
}

pub fn role_has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Asserts the catalog invariants: every role set is non-empty and
/// duplicate-free, and Admin's set is a superset of every other role's.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for role in Role::ALL {
        let set = permissions_for(role);
        if set.is_empty() {
            return Err(CatalogError::EmptyRoleSet { role });
        }
        for (index, permission) in set.iter().enumerate() {
            if set[..index].contains(permission) {
                return Err(CatalogError::DuplicateEntry {
                    role,
                    permission: *permission,
                });
            }
            if !ADMIN_PERMISSIONS.contains(permission) {
                return Err(CatalogError::AdminNotSuperset {
                    role,
                    permission: *permission,
                });
            }
        }
    }
    Ok(())
}
