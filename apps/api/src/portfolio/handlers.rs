use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::portfolio::{
    CreatePortfolio, PortfolioAggregate, PortfolioRow, UpdatePortfolio,
};
use crate::portfolio::repo;
use crate::state::AppState;

/// GET /api/portfolio/:user_id
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PortfolioAggregate>, AppError> {
    let aggregate = repo::load_aggregate(&state.db, &user_id).await?;
    Ok(Json(aggregate))
}

/// POST /api/portfolio
pub async fn handle_create_portfolio(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreatePortfolio>,
) -> Result<Json<PortfolioRow>, AppError> {
    body.validate()?;
    let row = repo::create_portfolio(&state.db, &body).await?;
    Ok(Json(row))
}

/// PUT /api/portfolio/:user_id
pub async fn handle_update_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(body): AppJson<UpdatePortfolio>,
) -> Result<Json<PortfolioRow>, AppError> {
    body.validate()?;
    let row = repo::update_portfolio(&state.db, &user_id, &body).await?;
    Ok(Json(row))
}
