use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::certification::{CertificationRow, CreateCertification};
use crate::models::education::{CreateEducation, EducationRow};
use crate::models::experience::{CreateExperience, ExperienceRow, UpdateExperience};
use crate::models::project::{CreateProject, ProjectRow, UpdateProject};
use crate::models::skill::{CreateSkill, SkillRow, UpdateSkill};

/// One sub-resource table: SQL name plus the noun used in not-found
/// messages ("Experience not found").
pub struct Table {
    pub name: &'static str,
    pub noun: &'static str,
}

pub const EXPERIENCE: Table = Table {
    name: "experience",
    noun: "Experience",
};
pub const PROJECTS: Table = Table {
    name: "projects",
    noun: "Project",
};
pub const SKILLS: Table = Table {
    name: "skills",
    noun: "Skill",
};
pub const EDUCATION: Table = Table {
    name: "education",
    noun: "Education",
};
pub const CERTIFICATIONS: Table = Table {
    name: "certifications",
    noun: "Certification",
};

/// Fixed cap on every list read; there is no pagination.
pub const LIST_CAP: i64 = 100;

/// Returns all rows of one sub-resource table for a portfolio, sorted by
/// display order. `created_at` breaks order ties deterministically.
pub async fn list<T>(pool: &PgPool, table: &Table, portfolio_id: Uuid) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT * FROM {} WHERE portfolio_id = $1 ORDER BY sort_order, created_at LIMIT $2",
        table.name
    );
    Ok(sqlx::query_as::<_, T>(&sql)
        .bind(portfolio_id)
        .bind(LIST_CAP)
        .fetch_all(pool)
        .await?)
}

/// Deletes one row scoped by both its id and the owning portfolio, so a
/// valid id from another portfolio never matches.
pub async fn delete(
    pool: &PgPool,
    table: &Table,
    portfolio_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND portfolio_id = $2",
        table.name
    );
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(portfolio_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} not found", table.noun)));
    }
    Ok(())
}

pub async fn create_experience(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &CreateExperience,
) -> Result<ExperienceRow, AppError> {
    Ok(sqlx::query_as::<_, ExperienceRow>(
        r#"
        INSERT INTO experience
            (id, portfolio_id, role, company, location, period,
             start_date, end_date, current, highlights, skills, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.role)
    .bind(&input.company)
    .bind(&input.location)
    .bind(&input.period)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(input.current)
    .bind(&input.highlights)
    .bind(&input.skills)
    .bind(input.order)
    .fetch_one(pool)
    .await?)
}

/// Applies only the fields present in the patch, scoped by the compound key.
/// The RETURNING row is the same row the write matched, so the re-read can
/// never drift to another portfolio's record.
pub async fn update_experience(
    pool: &PgPool,
    portfolio_id: Uuid,
    id: Uuid,
    input: &UpdateExperience,
) -> Result<ExperienceRow, AppError> {
    let row: Option<ExperienceRow> = sqlx::query_as(
        r#"
        UPDATE experience SET
            role       = CASE WHEN $3  THEN $4  ELSE role END,
            company    = CASE WHEN $5  THEN $6  ELSE company END,
            location   = CASE WHEN $7  THEN $8  ELSE location END,
            period     = CASE WHEN $9  THEN $10 ELSE period END,
            start_date = CASE WHEN $11 THEN $12 ELSE start_date END,
            end_date   = CASE WHEN $13 THEN $14 ELSE end_date END,
            current    = CASE WHEN $15 THEN $16 ELSE current END,
            highlights = CASE WHEN $17 THEN $18 ELSE highlights END,
            skills     = CASE WHEN $19 THEN $20 ELSE skills END,
            sort_order = CASE WHEN $21 THEN $22 ELSE sort_order END,
            updated_at = now()
        WHERE id = $1 AND portfolio_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(portfolio_id)
    .bind(input.role.write())
    .bind(input.role.value())
    .bind(input.company.write())
    .bind(input.company.value())
    .bind(input.location.write())
    .bind(input.location.value())
    .bind(input.period.write())
    .bind(input.period.value())
    .bind(input.start_date.write())
    .bind(input.start_date.value())
    .bind(input.end_date.write())
    .bind(input.end_date.value())
    .bind(input.current.write())
    .bind(input.current.value())
    .bind(input.highlights.write())
    .bind(input.highlights.value())
    .bind(input.skills.write())
    .bind(input.skills.value())
    .bind(input.order.write())
    .bind(input.order.value())
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
}

pub async fn create_project(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &CreateProject,
) -> Result<ProjectRow, AppError> {
    Ok(sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects
            (id, portfolio_id, title, status, icon, description, tech,
             github, github_url, demo, demo_url, featured, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.title)
    .bind(&input.status)
    .bind(&input.icon)
    .bind(&input.description)
    .bind(&input.tech)
    .bind(input.github)
    .bind(&input.github_url)
    .bind(input.demo)
    .bind(&input.demo_url)
    .bind(input.featured)
    .bind(input.order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_project(
    pool: &PgPool,
    portfolio_id: Uuid,
    id: Uuid,
    input: &UpdateProject,
) -> Result<ProjectRow, AppError> {
    let row: Option<ProjectRow> = sqlx::query_as(
        r#"
        UPDATE projects SET
            title       = CASE WHEN $3  THEN $4  ELSE title END,
            status      = CASE WHEN $5  THEN $6  ELSE status END,
            icon        = CASE WHEN $7  THEN $8  ELSE icon END,
            description = CASE WHEN $9  THEN $10 ELSE description END,
            tech        = CASE WHEN $11 THEN $12 ELSE tech END,
            github      = CASE WHEN $13 THEN $14 ELSE github END,
            github_url  = CASE WHEN $15 THEN $16 ELSE github_url END,
            demo        = CASE WHEN $17 THEN $18 ELSE demo END,
            demo_url    = CASE WHEN $19 THEN $20 ELSE demo_url END,
            featured    = CASE WHEN $21 THEN $22 ELSE featured END,
            sort_order  = CASE WHEN $23 THEN $24 ELSE sort_order END,
            updated_at  = now()
        WHERE id = $1 AND portfolio_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(portfolio_id)
    .bind(input.title.write())
    .bind(input.title.value())
    .bind(input.status.write())
    .bind(input.status.value())
    .bind(input.icon.write())
    .bind(input.icon.value())
    .bind(input.description.write())
    .bind(input.description.value())
    .bind(input.tech.write())
    .bind(input.tech.value())
    .bind(input.github.write())
    .bind(input.github.value())
    .bind(input.github_url.write())
    .bind(input.github_url.value())
    .bind(input.demo.write())
    .bind(input.demo.value())
    .bind(input.demo_url.write())
    .bind(input.demo_url.value())
    .bind(input.featured.write())
    .bind(input.featured.value())
    .bind(input.order.write())
    .bind(input.order.value())
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

pub async fn create_skill(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &CreateSkill,
) -> Result<SkillRow, AppError> {
    Ok(sqlx::query_as::<_, SkillRow>(
        r#"
        INSERT INTO skills (id, portfolio_id, category, icon, skills, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.category)
    .bind(&input.icon)
    .bind(&input.skills)
    .bind(input.order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_skill(
    pool: &PgPool,
    portfolio_id: Uuid,
    id: Uuid,
    input: &UpdateSkill,
) -> Result<SkillRow, AppError> {
    let row: Option<SkillRow> = sqlx::query_as(
        r#"
        UPDATE skills SET
            category   = CASE WHEN $3 THEN $4  ELSE category END,
            icon       = CASE WHEN $5 THEN $6  ELSE icon END,
            skills     = CASE WHEN $7 THEN $8  ELSE skills END,
            sort_order = CASE WHEN $9 THEN $10 ELSE sort_order END,
            updated_at = now()
        WHERE id = $1 AND portfolio_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(portfolio_id)
    .bind(input.category.write())
    .bind(input.category.value())
    .bind(input.icon.write())
    .bind(input.icon.value())
    .bind(input.skills.write())
    .bind(input.skills.value())
    .bind(input.order.write())
    .bind(input.order.value())
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
}

pub async fn create_education(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &CreateEducation,
) -> Result<EducationRow, AppError> {
    Ok(sqlx::query_as::<_, EducationRow>(
        r#"
        INSERT INTO education
            (id, portfolio_id, degree, school, location, period,
             start_date, end_date, gpa, coursework, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.degree)
    .bind(&input.school)
    .bind(&input.location)
    .bind(&input.period)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(&input.gpa)
    .bind(&input.coursework)
    .bind(input.order)
    .fetch_one(pool)
    .await?)
}

pub async fn create_certification(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &CreateCertification,
) -> Result<CertificationRow, AppError> {
    Ok(sqlx::query_as::<_, CertificationRow>(
        r#"
        INSERT INTO certifications
            (id, portfolio_id, name, issuer, issue_date, expiry_date,
             credential_id, credential_url, image, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.name)
    .bind(&input.issuer)
    .bind(&input.issue_date)
    .bind(&input.expiry_date)
    .bind(&input.credential_id)
    .bind(&input.credential_url)
    .bind(&input.image)
    .bind(input.order)
    .fetch_one(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::models::portfolio::{CreatePortfolio, PortfolioRow};
    use crate::portfolio::repo::create_portfolio;

    // Storage-level tests; each runs against its own disposable database.
    // Opt in with `cargo test -- --ignored` once DATABASE_URL points at a
    // running Postgres server.

    async fn make_portfolio(pool: &PgPool, user_id: &str) -> PortfolioRow {
        let body: CreatePortfolio = serde_json::from_value(json!({
            "userId": user_id,
            "personalInfo": { "name": "Ada Lovelace", "title": "Analyst" }
        }))
        .unwrap();
        create_portfolio(pool, &body).await.unwrap()
    }

    fn skill_body(category: &str, order: i32) -> CreateSkill {
        serde_json::from_value(json!({
            "category": category,
            "icon": "shield",
            "skills": ["one"],
            "order": order
        }))
        .unwrap()
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_list_sorts_by_order_then_created_at(pool: PgPool) {
        let portfolio = make_portfolio(&pool, "ada").await;

        // "b" and "c" share a display order; insertion time breaks the tie.
        for (category, order) in [("b", 2), ("a", 0), ("c", 2)] {
            create_skill(&pool, portfolio.id, &skill_body(category, order))
                .await
                .unwrap();
        }

        let rows: Vec<SkillRow> = list(&pool, &SKILLS, portfolio.id).await.unwrap();
        let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["a", "b", "c"]);
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_list_caps_at_one_hundred(pool: PgPool) {
        let portfolio = make_portfolio(&pool, "ada").await;

        sqlx::query(
            r#"
            INSERT INTO skills (id, portfolio_id, category, icon, skills, sort_order)
            SELECT gen_random_uuid(), $1, 'Group ' || n, 'shield', '{}', n
            FROM generate_series(1, 120) AS n
            "#,
        )
        .bind(portfolio.id)
        .execute(&pool)
        .await
        .unwrap();

        let rows: Vec<SkillRow> = list(&pool, &SKILLS, portfolio.id).await.unwrap();
        assert_eq!(rows.len() as i64, LIST_CAP);
        assert_eq!(rows[0].order, 1);
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_update_is_scoped_to_the_owning_portfolio(pool: PgPool) {
        let owner = make_portfolio(&pool, "ada").await;
        let other = make_portfolio(&pool, "grace").await;
        let skill = create_skill(&pool, owner.id, &skill_body("Security", 1))
            .await
            .unwrap();

        let patch: UpdateSkill = serde_json::from_value(json!({ "order": 5 })).unwrap();

        let err = update_skill(&pool, other.id, skill.id, &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let updated = update_skill(&pool, owner.id, skill.id, &patch)
            .await
            .unwrap();
        assert_eq!(updated.order, 5);
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_update_touches_only_written_columns(pool: PgPool) {
        let portfolio = make_portfolio(&pool, "ada").await;
        let skill = create_skill(&pool, portfolio.id, &skill_body("Security", 1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let patch: UpdateSkill = serde_json::from_value(json!({ "order": 5 })).unwrap();
        let updated = update_skill(&pool, portfolio.id, skill.id, &patch)
            .await
            .unwrap();

        assert_eq!(updated.order, 5);
        assert_eq!(updated.category, skill.category);
        assert_eq!(updated.icon, skill.icon);
        assert_eq!(updated.skills, skill.skills);
        assert!(updated.updated_at > skill.updated_at);
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_update_clears_nullable_columns_on_explicit_null(pool: PgPool) {
        let portfolio = make_portfolio(&pool, "ada").await;
        let body: CreateExperience = serde_json::from_value(json!({
            "role": "Intern",
            "company": "Acme",
            "location": "Remote",
            "period": "Summer 2024",
            "endDate": "Aug 2024"
        }))
        .unwrap();
        let experience = create_experience(&pool, portfolio.id, &body).await.unwrap();
        assert_eq!(experience.end_date.as_deref(), Some("Aug 2024"));

        let patch: UpdateExperience =
            serde_json::from_value(json!({ "endDate": null, "current": true })).unwrap();
        let updated = update_experience(&pool, portfolio.id, experience.id, &patch)
            .await
            .unwrap();

        assert_eq!(updated.end_date, None);
        assert!(updated.current);
        assert_eq!(updated.role, "Intern");
    }

    #[sqlx::test]
    #[ignore = "requires a live Postgres via DATABASE_URL"]
    async fn test_delete_is_scoped_and_not_repeatable(pool: PgPool) {
        let owner = make_portfolio(&pool, "ada").await;
        let other = make_portfolio(&pool, "grace").await;
        let skill = create_skill(&pool, owner.id, &skill_body("Security", 1))
            .await
            .unwrap();

        let err = delete(&pool, &SKILLS, other.id, skill.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        delete(&pool, &SKILLS, owner.id, skill.id).await.unwrap();

        let err = delete(&pool, &SKILLS, owner.id, skill.id).await.unwrap_err();
        match err {
            AppError::NotFound(message) => assert_eq!(message, "Skill not found"),
            unexpected => panic!("expected not found, got {unexpected:?}"),
        }
    }
}
