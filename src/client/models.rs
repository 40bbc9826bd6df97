//! User resource models
//!
//! Field names follow the platform's camelCase JSON.

use serde::{Deserialize, Serialize};

/// A user as returned by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Only present when requested with `expand=profileSkills`
    #[serde(default)]
    pub profile_skills: Option<Vec<String>>,
    #[serde(default)]
    pub version: Option<i64>,
}

/// Body of `POST /api/v2/users`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PATCH /api/v2/users/{id}`
///
/// `version` must equal the user's current version or the platform
/// rejects the update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub version: i64,
}
