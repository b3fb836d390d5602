// Project roles and projectfile permissions

use crate::db::schema::Project;
use crate::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user holds on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Admin,
    Manager,
    Editor,
    Reporter,
    Reader,
}

impl ProjectRole {
    pub const ALL: [ProjectRole; 5] = [
        ProjectRole::Admin,
        ProjectRole::Manager,
        ProjectRole::Editor,
        ProjectRole::Reporter,
        ProjectRole::Reader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Admin => "admin",
            ProjectRole::Manager => "manager",
            ProjectRole::Editor => "editor",
            ProjectRole::Reporter => "reporter",
            ProjectRole::Reader => "reader",
        }
    }

    /// Managers and administrators
    pub fn is_elevated(&self) -> bool {
        matches!(self, ProjectRole::Admin | ProjectRole::Manager)
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        ProjectRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown project role: {}", s)))
    }
}

impl Project {
    /// Whether `role` may upload, replace or delete the QGIS/QField project
    /// files of this project.
    ///
    /// Editors can modify project files unless the project restricts them, in
    /// which case only managers and administrators can.
    pub fn can_modify_projectfiles(&self, role: ProjectRole) -> bool {
        if self.has_restricted_projectfiles {
            role.is_elevated()
        } else {
            role.is_elevated() || role == ProjectRole::Editor
        }
    }
}
