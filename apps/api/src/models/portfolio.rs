use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::{AppError, FieldError};
use crate::models::certification::CertificationRow;
use crate::models::education::EducationRow;
use crate::models::experience::ExperienceRow;
use crate::models::patch::{deny_null, Patch};
use crate::models::project::ProjectRow;
use crate::models::skill::SkillRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRow {
    pub id: Uuid,
    pub user_id: String,
    #[sqlx(json)]
    pub personal_info: PersonalInfo,
    #[sqlx(json)]
    pub stats: Vec<Stat>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate returned by GET /api/portfolio/:user_id: the portfolio plus
/// every sub-collection, each sorted by display order.
#[derive(Debug, Serialize)]
pub struct PortfolioAggregate {
    pub portfolio: PortfolioRow,
    pub experience: Vec<ExperienceRow>,
    pub projects: Vec<ProjectRow>,
    pub skills: Vec<SkillRow>,
    pub education: Vec<EducationRow>,
    pub certifications: Vec<CertificationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolio {
    pub user_id: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl CreatePortfolio {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::fields(vec![FieldError {
                field: "userId".to_string(),
                message: "must not be empty".to_string(),
            }]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolio {
    #[serde(default)]
    pub personal_info: Patch<PersonalInfo>,
    #[serde(default)]
    pub stats: Patch<Vec<Stat>>,
}

impl UpdatePortfolio {
    /// Both columns are non-nullable; an explicit null is a validation error,
    /// not a write.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        deny_null(&self.personal_info, "personalInfo", &mut errors);
        deny_null(&self.stats, "stats", &mut errors);
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

    fn sample_info() -> PersonalInfo {
        PersonalInfo {
            name: "Ada Lovelace".to_string(),
            title: "Analyst".to_string(),
            bio: String::new(),
            profile_image: None,
            location: "London".to_string(),
            email: "ada@example.com".to_string(),
            linkedin: String::new(),
            github: String::new(),
        }
    }

    #[test]
    fn test_row_serializes_camel_case_with_iso_timestamps() {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let row = PortfolioRow {
            id: Uuid::nil(),
            user_id: "ada".to_string(),
            personal_info: sample_info(),
            stats: vec![Stat {
                value: "3+".to_string(),
                label: "Years".to_string(),
                order: 1,
            }],
            created_at: created,
            updated_at: created,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["userId"], "ada");
        assert_eq!(json["personalInfo"]["name"], "Ada Lovelace");
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00Z");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_create_payload_fills_defaults() {
        let body: CreatePortfolio = serde_json::from_value(serde_json::json!({
            "userId": "ada",
            "personalInfo": { "name": "Ada Lovelace", "title": "Analyst" }
        }))
        .unwrap();

        assert_eq!(body.user_id, "ada");
        assert_eq!(body.personal_info.bio, "");
        assert_eq!(body.personal_info.profile_image, None);
        assert!(body.stats.is_empty());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_blank_user_id() {
        let body: CreatePortfolio = serde_json::from_value(serde_json::json!({
            "userId": "   ",
            "personalInfo": { "name": "Ada Lovelace", "title": "Analyst" }
        }))
        .unwrap();

        assert!(body.validate().is_err());
    }

    #[test]
    fn test_create_requires_personal_info() {
        let result = serde_json::from_value::<CreatePortfolio>(serde_json::json!({
            "userId": "ada"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_distinguishes_absent_from_null() {
        let absent: UpdatePortfolio = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(absent.stats, Patch::Absent);
        assert!(absent.validate().is_ok());

        let null: UpdatePortfolio =
            serde_json::from_value(serde_json::json!({ "stats": null })).unwrap();
        assert_eq!(null.stats, Patch::Null);
        assert!(null.validate().is_err());

        let valued: UpdatePortfolio =
            serde_json::from_value(serde_json::json!({ "stats": [] })).unwrap();
        assert_eq!(valued.stats, Patch::Value(Vec::new()));
        assert!(valued.validate().is_ok());
    }
}
