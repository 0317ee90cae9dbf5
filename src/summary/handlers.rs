use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{DayDetails, MonthCalendar, MonthQuery, PartnerOverview};
use super::services::{day_details, month_calendar};
use crate::{
    auth::services::AuthUser,
    dates::DateKey,
    journal::{self, model::Stats, JournalError},
    state::AppState,
};

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/days/:date", get(get_day))
        .route("/calendar", get(get_calendar))
        .route("/stats", get(get_stats))
}

pub fn partner_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/overview", get(partner_overview))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<DateKey>,
) -> Result<Json<DayDetails>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(day_details(&data, date)))
}

/// GET /calendar?month=YYYY-MM
#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MonthQuery>,
) -> Result<Json<MonthCalendar>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(month_calendar(&data, q.month)))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Stats>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(data.stats))
}

/// Read-only view of another user's progress for the month.
#[instrument(skip(state))]
pub async fn partner_overview(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<Uuid>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<PartnerOverview>, (StatusCode, String)> {
    let data = state
        .journals
        .load(user_id)
        .await
        .map_err(JournalError::from)?
        .ok_or(JournalError::NotFound("user"))?;
    info!(%viewer, %user_id, month = %q.month, "partner overview read");

    Ok(Json(PartnerOverview {
        user_id,
        stats: data.stats,
        calendar: month_calendar(&data, q.month),
    }))
}
