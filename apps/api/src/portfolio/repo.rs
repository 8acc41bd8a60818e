use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{conflict_on_unique, AppError};
use crate::models::certification::CertificationRow;
use crate::models::education::EducationRow;
use crate::models::experience::ExperienceRow;
use crate::models::portfolio::{
    CreatePortfolio, PortfolioAggregate, PortfolioRow, UpdatePortfolio,
};
use crate::models::project::ProjectRow;
use crate::models::skill::SkillRow;
use crate::sections::repo::{list, CERTIFICATIONS, EDUCATION, EXPERIENCE, PROJECTS, SKILLS};

/// Looks up the portfolio for a business user id, if any.
/// Exact, case-sensitive match; no normalization.
pub async fn find_portfolio(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<PortfolioRow>, AppError> {
    Ok(
        sqlx::query_as::<_, PortfolioRow>("SELECT * FROM portfolios WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Resolves `userId -> portfolio`, the prerequisite for every scoped
/// operation. Every caller sees the same NotFound on a missing parent.
pub async fn resolve_portfolio(pool: &PgPool, user_id: &str) -> Result<PortfolioRow, AppError> {
    find_portfolio(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
}

/// Assembles the full aggregate: the portfolio plus each sub-collection.
/// Any fetch failure aborts the whole read; no partial aggregate.
pub async fn load_aggregate(pool: &PgPool, user_id: &str) -> Result<PortfolioAggregate, AppError> {
    let portfolio = resolve_portfolio(pool, user_id).await?;

    let experience: Vec<ExperienceRow> = list(pool, &EXPERIENCE, portfolio.id).await?;
    let projects: Vec<ProjectRow> = list(pool, &PROJECTS, portfolio.id).await?;
    let skills: Vec<SkillRow> = list(pool, &SKILLS, portfolio.id).await?;
    let education: Vec<EducationRow> = list(pool, &EDUCATION, portfolio.id).await?;
    let certifications: Vec<CertificationRow> = list(pool, &CERTIFICATIONS, portfolio.id).await?;

    Ok(PortfolioAggregate {
        portfolio,
        experience,
        projects,
        skills,
        education,
        certifications,
    })
}

/// Inserts a new portfolio. Uniqueness of `user_id` is the UNIQUE
/// constraint's job; a violation surfaces as a Conflict, so there is no
/// racy pre-check anywhere on this path.
pub async fn create_portfolio(
    pool: &PgPool,
    input: &CreatePortfolio,
) -> Result<PortfolioRow, AppError> {
    let row: PortfolioRow = sqlx::query_as(
        r#"
        INSERT INTO portfolios (id, user_id, personal_info, stats)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.user_id)
    .bind(Json(&input.personal_info))
    .bind(Json(&input.stats))
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "Portfolio already exists for this user"))?;

    info!("Created portfolio {} for user {}", row.id, row.user_id);
    Ok(row)
}

/// Applies only the fields present in the patch and refreshes `updated_at`.
/// Returns the stored record from the same UPDATE that wrote it.
pub async fn update_portfolio(
    pool: &PgPool,
    user_id: &str,
    input: &UpdatePortfolio,
) -> Result<PortfolioRow, AppError> {
    let row: Option<PortfolioRow> = sqlx::query_as(
        r#"
        UPDATE portfolios SET
            personal_info = CASE WHEN $2 THEN $3 ELSE personal_info END,
            stats         = CASE WHEN $4 THEN $5 ELSE stats END,
            updated_at    = now()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(input.personal_info.write())
    .bind(input.personal_info.value().map(Json))
    .bind(input.stats.write())
    .bind(input.stats.value().map(Json))
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
}
