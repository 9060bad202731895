//! Week and day endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use monthplan_core::{DayView, WeekToken, WeekView, parse_date};

use crate::routes::{AppError, Identity, with_planner};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user}/weeks/{week}", get(week_view))
        .route("/users/{user}/days/{date}", get(day_view))
}

/// GET /users/:user/weeks/:week - Seven days and the tasks worked on
async fn week_view(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, week)): Path<(String, String)>,
) -> Result<Json<WeekView>, AppError> {
    let week: WeekToken = week.parse()?;
    let view =
        with_planner(&state, move |planner| planner.week_view(&identity.0, &user, week)).await?;
    Ok(Json(view))
}

/// GET /users/:user/days/:date - One day's activities and meetings
async fn day_view(
    State(state): State<AppState>,
    identity: Identity,
    Path((user, date)): Path<(String, String)>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let view =
        with_planner(&state, move |planner| planner.day_view(&identity.0, &user, date)).await?;
    Ok(Json(view))
}
