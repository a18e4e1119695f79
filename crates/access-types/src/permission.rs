use std::fmt;

use serde::{Deserialize, Serialize};

/// Atomic capability over the StudyHub domain. Permissions never imply each
/// other; any bundling happens in the permission catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ReadUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ReadProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ReadStudy,
    CreateStudy,
    UpdateStudy,
    DeleteStudy,
    ReadDocument,
    UploadDocument,
    DeleteDocument,
    GenerateContent,
    ViewReports,
    ManageSettings,
}

impl Permission {
    pub const ALL: [Permission; 18] = [
        Permission::ReadUser,
        Permission::CreateUser,
        Permission::UpdateUser,
        Permission::DeleteUser,
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
        Permission::ManageSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadUser => "READ_USER",
            Permission::CreateUser => "CREATE_USER",
            Permission::UpdateUser => "UPDATE_USER",
            Permission::DeleteUser => "DELETE_USER",
            Permission::ReadProject => "READ_PROJECT",
            Permission::CreateProject => "CREATE_PROJECT",
            Permission::UpdateProject => "UPDATE_PROJECT",
            Permission::DeleteProject => "DELETE_PROJECT",
            Permission::ReadStudy => "READ_STUDY",
            Permission::CreateStudy => "CREATE_STUDY",
            Permission::UpdateStudy => "UPDATE_STUDY",
            Permission::DeleteStudy => "DELETE_STUDY",
            Permission::ReadDocument => "READ_DOCUMENT",
            Permission::UploadDocument => "UPLOAD_DOCUMENT",
            Permission::DeleteDocument => "DELETE_DOCUMENT",
            Permission::GenerateContent => "GENERATE_CONTENT",
            Permission::ViewReports => "VIEW_REPORTS",
            Permission::ManageSettings => "MANAGE_SETTINGS",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
