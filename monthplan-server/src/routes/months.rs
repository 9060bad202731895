//! Month governance endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use monthplan_core::{MonthToken, MonthView, OpenedMonth, PlanningStatus};
use serde::Deserialize;

use crate::routes::{AppError, Identity, with_planner};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user}/months/{month}", get(month_view))
        .route("/users/{user}/months/{month}/open", post(open_month))
        .route("/users/{user}/months/{month}/confirm", post(confirm))
        .route("/users/{user}/months/{month}/unconfirm", post(unconfirm))
        .route("/users/{user}/months/{month}/status", get(status))
        .route("/users/{user}/months/{month}/ai-score", put(record_ai_score))
}

/// POST /users/:user/months/:month/open - Unlock a future month
async fn open_month(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
) -> Result<Json<OpenedMonth>, AppError> {
    let month: MonthToken = month.parse()?;
    identity.require_owner(&user)?;
    let opened = with_planner(&state, move |planner| planner.open_month(&user, month)).await?;
    Ok(Json(opened))
}

/// POST /users/:user/months/:month/confirm - Lock in the month's plan
async fn confirm(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
) -> Result<Json<PlanningStatus>, AppError> {
    let month: MonthToken = month.parse()?;
    identity.require_owner(&user)?;
    let status = with_planner(&state, move |planner| planner.confirm(&user, month)).await?;
    Ok(Json(status))
}

/// POST /users/:user/months/:month/unconfirm - Reopen a confirmed plan
async fn unconfirm(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
) -> Result<Json<PlanningStatus>, AppError> {
    let month: MonthToken = month.parse()?;
    let role = identity.0.role;
    let status =
        with_planner(&state, move |planner| planner.unconfirm(&user, month, role)).await?;
    Ok(Json(status))
}

/// GET /users/:user/months/:month/status - Confirmation progress
async fn status(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
) -> Result<Json<PlanningStatus>, AppError> {
    let month: MonthToken = month.parse()?;
    let status = with_planner(&state, move |planner| {
        planner.ensure_can_view(&identity.0, &user, month)?;
        planner.status(&user, month)
    })
    .await?;
    Ok(Json(status))
}

/// Request body for recording a score
#[derive(Deserialize)]
pub struct ScoreRequest {
    pub score: f32,
}

/// PUT /users/:user/months/:month/ai-score - Attach the scorer's result
async fn record_ai_score(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<PlanningStatus>, AppError> {
    let month: MonthToken = month.parse()?;
    identity.require_elevated()?;
    let status = with_planner(&state, move |planner| {
        planner.record_ai_score(&user, month, req.score)
    })
    .await?;
    Ok(Json(status))
}

/// GET /users/:user/months/:month - Calendar grid and goals
async fn month_view(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, month)): Path<(String, String)>,
) -> Result<Json<MonthView>, AppError> {
    let month: MonthToken = month.parse()?;
    let view =
        with_planner(&state, move |planner| planner.month_view(&identity.0, &user, month)).await?;
    Ok(Json(view))
}
