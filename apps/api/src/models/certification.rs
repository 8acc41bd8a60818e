use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Certifications expose list/create only; there is deliberately no update type.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRow {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub name: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_only_name() {
        let body: CreateCertification =
            serde_json::from_value(serde_json::json!({ "name": "OSCP" })).unwrap();
        assert_eq!(body.name, "OSCP");
        assert_eq!(body.issuer, None);
        assert_eq!(body.order, 0);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let body: CreateCertification = serde_json::from_value(serde_json::json!({
            "name": "OSCP",
            "issueDate": "2024-01",
            "credentialUrl": "https://example.com/cert"
        }))
        .unwrap();
        assert_eq!(body.issue_date.as_deref(), Some("2024-01"));
        assert_eq!(
            body.credential_url.as_deref(),
            Some("https://example.com/cert")
        );
    }
}
