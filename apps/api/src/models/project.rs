use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::patch::{deny_null, Patch};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub title: String,
    pub status: String,
    pub icon: String,
    pub description: String,
    pub tech: Vec<String>,
    pub github: bool,
    pub github_url: Option<String>,
    pub demo: bool,
    pub demo_url: Option<String>,
    pub featured: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    pub status: String,
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub github: bool,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo: bool,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default)]
    pub icon: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub tech: Patch<Vec<String>>,
    #[serde(default)]
    pub github: Patch<bool>,
    #[serde(default)]
    pub github_url: Patch<String>,
    #[serde(default)]
    pub demo: Patch<bool>,
    #[serde(default)]
    pub demo_url: Patch<String>,
    #[serde(default)]
    pub featured: Patch<bool>,
    #[serde(default)]
    pub order: Patch<i32>,
}

impl UpdateProject {
    /// Only `githubUrl` and `demoUrl` are nullable in storage.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        deny_null(&self.title, "title", &mut errors);
        deny_null(&self.status, "status", &mut errors);
        deny_null(&self.icon, "icon", &mut errors);
        deny_null(&self.description, "description", &mut errors);
        deny_null(&self.tech, "tech", &mut errors);
        deny_null(&self.github, "github", &mut errors);
        deny_null(&self.demo, "demo", &mut errors);
        deny_null(&self.featured, "featured", &mut errors);
        deny_null(&self.order, "order", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::fields(errors))
        }
    }
}
