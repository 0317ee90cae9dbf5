use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{InstallPlanRequest, InstalledPlanResponse, PlanDayCount};
use super::services::{install_plan, parse_plan_text};
use crate::{
    auth::services::AuthUser,
    journal::{self, model::DietPlan, JournalError},
    state::AppState,
};

pub fn plan_routes(max_text_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/plan", get(get_plan).post(upload_plan))
        // room for JSON framing around the text itself
        .layer(DefaultBodyLimit::max(max_text_bytes + 64 * 1024))
}

/// POST /plan { text, start_date }
#[instrument(skip(state, body))]
pub async fn upload_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<InstallPlanRequest>,
) -> Result<(StatusCode, HeaderMap, Json<InstalledPlanResponse>), (StatusCode, String)> {
    let days = parse_plan_text(&body.text, &state.config.plan).map_err(|e| {
        warn!(error = %e, %user_id, "diet plan rejected");
        JournalError::from(e)
    })?;

    let horizon = state.config.plan.horizon_days;
    let start = body.start_date;
    let (plan, dates_filled) = journal::services::mutate(&state, user_id, move |data| {
        let plan = install_plan(data, start, days, horizon);
        Ok((plan, data.meals.len()))
    })
    .await?;

    let days: Vec<PlanDayCount> = plan
        .meals
        .iter()
        .map(|(&day_index, meals)| PlanDayCount {
            day_index,
            meals: meals.len(),
        })
        .collect();
    let total_meals: usize = days.iter().map(|d| d.meals).sum();
    info!(%user_id, plan_id = %plan.id, total_meals, "plan uploaded");

    let mut headers = HeaderMap::new();
    if let Ok(location) = "/api/v1/plan".parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(InstalledPlanResponse {
            id: plan.id,
            start_date: plan.start_date,
            days,
            total_meals,
            dates_filled,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DietPlan>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    data.diet_plan
        .map(Json)
        .ok_or_else(|| JournalError::NotFound("diet plan").into())
}
