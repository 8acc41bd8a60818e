use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::certification::{CertificationRow, CreateCertification};
use crate::models::education::{CreateEducation, EducationRow};
use crate::models::experience::{CreateExperience, ExperienceRow, UpdateExperience};
use crate::models::project::{CreateProject, ProjectRow, UpdateProject};
use crate::models::skill::{CreateSkill, SkillRow, UpdateSkill};
use crate::portfolio::repo::resolve_portfolio;
use crate::sections::repo;
use crate::state::AppState;

// Every handler resolves userId -> portfolio first and scopes the operation
// by the resolved id. Patch bodies are validated before the resolver runs.

/// GET /api/portfolio/:user_id/experience
pub async fn handle_list_experience(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ExperienceRow>>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let rows = repo::list(&state.db, &repo::EXPERIENCE, portfolio.id).await?;
    Ok(Json(rows))
}

/// POST /api/portfolio/:user_id/experience
pub async fn handle_create_experience(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<CreateExperience>,
) -> Result<Json<ExperienceRow>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::create_experience(&state.db, portfolio.id, &body).await?;
    Ok(Json(row))
}

/// PUT /api/portfolio/:user_id/experience/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
    AppJson(body): AppJson<UpdateExperience>,
) -> Result<Json<ExperienceRow>, AppError> {
    body.validate()?;
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::update_experience(&state.db, portfolio.id, id, &body).await?;
    Ok(Json(row))
}

/// DELETE /api/portfolio/:user_id/experience/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    repo::delete(&state.db, &repo::EXPERIENCE, portfolio.id, id).await?;
    Ok(Json(json!({ "message": "Experience deleted successfully" })))
}

/// GET /api/portfolio/:user_id/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let rows = repo::list(&state.db, &repo::PROJECTS, portfolio.id).await?;
    Ok(Json(rows))
}

/// POST /api/portfolio/:user_id/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<CreateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::create_project(&state.db, portfolio.id, &body).await?;
    Ok(Json(row))
}

/// PUT /api/portfolio/:user_id/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
    AppJson(body): AppJson<UpdateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    body.validate()?;
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::update_project(&state.db, portfolio.id, id, &body).await?;
    Ok(Json(row))
}

/// DELETE /api/portfolio/:user_id/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    repo::delete(&state.db, &repo::PROJECTS, portfolio.id, id).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

/// GET /api/portfolio/:user_id/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let rows = repo::list(&state.db, &repo::SKILLS, portfolio.id).await?;
    Ok(Json(rows))
}

/// POST /api/portfolio/:user_id/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<CreateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::create_skill(&state.db, portfolio.id, &body).await?;
    Ok(Json(row))
}

/// PUT /api/portfolio/:user_id/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
    AppJson(body): AppJson<UpdateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    body.validate()?;
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::update_skill(&state.db, portfolio.id, id, &body).await?;
    Ok(Json(row))
}

/// DELETE /api/portfolio/:user_id/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    repo::delete(&state.db, &repo::SKILLS, portfolio.id, id).await?;
    Ok(Json(json!({ "message": "Skill deleted successfully" })))
}

/// GET /api/portfolio/:user_id/education
pub async fn handle_list_education(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<EducationRow>>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let rows = repo::list(&state.db, &repo::EDUCATION, portfolio.id).await?;
    Ok(Json(rows))
}

/// POST /api/portfolio/:user_id/education
pub async fn handle_create_education(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<CreateEducation>,
) -> Result<Json<EducationRow>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::create_education(&state.db, portfolio.id, &body).await?;
    Ok(Json(row))
}

/// GET /api/portfolio/:user_id/certifications
pub async fn handle_list_certifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CertificationRow>>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let rows = repo::list(&state.db, &repo::CERTIFICATIONS, portfolio.id).await?;
    Ok(Json(rows))
}

/// POST /api/portfolio/:user_id/certifications
pub async fn handle_create_certification(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<CreateCertification>,
) -> Result<Json<CertificationRow>, AppError> {
    let portfolio = resolve_portfolio(&state.db, &user_id).await?;
    let row = repo::create_certification(&state.db, portfolio.id, &body).await?;
    Ok(Json(row))
}
