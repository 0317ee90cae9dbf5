use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{MealToggledResponse, RenameMealRequest};
use super::services::{rename_meal, toggle_meal};
use crate::{
    auth::services::AuthUser,
    dates::DateKey,
    journal::{self, model::MealRecord},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/days/:date/meals", get(list_meals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/days/:date/meals/:meal_id", patch(rename))
        .route("/days/:date/meals/:meal_id/toggle", post(toggle))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<DateKey>,
) -> Result<Json<Vec<MealRecord>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(data.meals_on(date).to_vec()))
}

#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((date, meal_id)): Path<(DateKey, Uuid)>,
) -> Result<Json<MealToggledResponse>, (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let (meal, summary) = toggle_meal(data, date, meal_id)?;
        Ok(MealToggledResponse {
            meal,
            summary,
            stats: data.stats,
        })
    })
    .await?;
    Ok(Json(res))
}

#[instrument(skip(state, body))]
pub async fn rename(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((date, meal_id)): Path<(DateKey, Uuid)>,
    Json(body): Json<RenameMealRequest>,
) -> Result<Json<MealRecord>, (StatusCode, String)> {
    let meal =
        journal::services::mutate(&state, user_id, |data| rename_meal(data, date, meal_id, &body.name))
            .await?;
    Ok(Json(meal))
}
