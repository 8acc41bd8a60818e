use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::patch::{deny_null, Patch};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillRow {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub category: String,
    pub icon: String,
    pub skills: Vec<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkill {
    pub category: String,
    pub icon: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkill {
    #[serde(default)]
    pub category: Patch<String>,
    #[serde(default)]
    pub icon: Patch<String>,
    #[serde(default)]
    pub skills: Patch<Vec<String>>,
    #[serde(default)]
    pub order: Patch<i32>,
}

impl UpdateSkill {
    /// No nullable columns; any explicit null is a validation error.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        deny_null(&self.category, "category", &mut errors);
        deny_null(&self.icon, "icon", &mut errors);
        deny_null(&self.skills, "skills", &mut errors);
        deny_null(&self.order, "order", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::fields(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_only_order() {
        let body: UpdateSkill = serde_json::from_value(serde_json::json!({ "order": 5 })).unwrap();
        assert_eq!(body.order, Patch::Value(5));
        assert_eq!(body.category, Patch::Absent);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_any_null() {
        let body: UpdateSkill =
            serde_json::from_value(serde_json::json!({ "skills": null })).unwrap();
        assert!(body.validate().is_err());
    }
}
