use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::patch::{deny_null, Patch};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRow {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub role: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub highlights: Vec<String>,
    pub skills: Vec<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperience {
    pub role: String,
    pub company: String,
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperience {
    #[serde(default)]
    pub role: Patch<String>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub period: Patch<String>,
    #[serde(default)]
    pub start_date: Patch<String>,
    #[serde(default)]
    pub end_date: Patch<String>,
    #[serde(default)]
    pub current: Patch<bool>,
    #[serde(default)]
    pub highlights: Patch<Vec<String>>,
    #[serde(default)]
    pub skills: Patch<Vec<String>>,
    #[serde(default)]
    pub order: Patch<i32>,
}

impl UpdateExperience {
    /// Only `startDate` and `endDate` are nullable in storage.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        deny_null(&self.role, "role", &mut errors);
        deny_null(&self.company, "company", &mut errors);
        deny_null(&self.location, "location", &mut errors);
        deny_null(&self.period, "period", &mut errors);
        deny_null(&self.current, "current", &mut errors);
        deny_null(&self.highlights, "highlights", &mut errors);
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
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_row_wire_format() {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let row = ExperienceRow {
            id: Uuid::nil(),
            portfolio_id: Uuid::nil(),
            role: "Intern".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            period: "May 2024 - Present".to_string(),
            start_date: Some("2024-05".to_string()),
            end_date: None,
            current: true,
            highlights: vec!["Shipped a thing".to_string()],
            skills: vec!["Rust".to_string()],
            order: 1,
            created_at: stamp,
            updated_at: stamp,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["portfolioId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["startDate"], "2024-05");
        assert_eq!(json["endDate"], serde_json::Value::Null);
        assert_eq!(json["order"], 1);
        assert_eq!(json["updatedAt"], "2024-05-01T00:00:00Z");
    }

    #[test]
    fn test_create_defaults() {
        let body: CreateExperience = serde_json::from_value(serde_json::json!({
            "role": "Intern",
            "company": "Acme",
            "location": "Remote",
            "period": "Summer 2024"
        }))
        .unwrap();

        assert!(!body.current);
        assert!(body.highlights.is_empty());
        assert_eq!(body.order, 0);
        assert_eq!(body.start_date, None);
    }

    #[test]
    fn test_update_null_rules() {
        let body: UpdateExperience = serde_json::from_value(serde_json::json!({
            "endDate": null,
            "order": 5
        }))
        .unwrap();

        // Clearing a nullable column is fine; everything else untouched.
        assert_eq!(body.end_date, Patch::Null);
        assert_eq!(body.order, Patch::Value(5));
        assert_eq!(body.role, Patch::Absent);
        assert!(body.validate().is_ok());

        let bad: UpdateExperience =
            serde_json::from_value(serde_json::json!({ "role": null })).unwrap();
        let err = bad.validate().unwrap_err();
        match err {
            AppError::Validation { fields, .. } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "role");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
