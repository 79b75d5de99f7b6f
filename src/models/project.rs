use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

pub const PROJECT_CATEGORIES: [&str; 8] = [
    "Mejora vegetal",
    "Conservación",
    "Agronomía",
    "Agroecología",
    "Semillas",
    "Investigación",
    "Educación",
    "Otro",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
    Closed,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "Abierto",
            ProjectStatus::InProgress => "En progreso",
            ProjectStatus::Completed => "Completado",
            ProjectStatus::Closed => "Cerrado",
        }
    }

    /// Bootstrap contextual colour used for the status badge.
    pub fn color(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "success",
            ProjectStatus::InProgress => "primary",
            ProjectStatus::Completed => "secondary",
            ProjectStatus::Closed => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub volunteers_needed: i64,
    #[serde(default)]
    pub volunteer_requirements: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub volunteers_needed: i64,
    pub volunteer_requirements: Option<String>,
    pub tags: Vec<String>,
}

/// Partial project update.
///
/// Nullable columns use `Option<Option<_>>`: `None` leaves the field alone,
/// `Some(None)` clears it. Serialize-only: serde cannot tell a missing key
/// from `null` when reading `Option<Option<_>>`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers_needed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteer_requirements: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Client-side filter applied by [`crate::stores::ProjectStore::projects`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub search_bar: String,
    pub category: Option<String>,
    pub status: Option<ProjectStatus>,
}
