use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    DayEffect, DayRefreshed, GymSessionRequest, OtherSportRequest, ScheduleRequest,
    TrainingFilter, WorkoutDeleted, WorkoutInput,
};
use super::services;
use crate::{
    auth::services::AuthUser,
    dates::DateKey,
    journal::{
        self,
        model::{GymSession, OtherSportRecord, ScheduledWorkout, WorkoutDefinition},
    },
    state::AppState,
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/:id", put(update_workout).delete(delete_workout))
}

pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", post(schedule))
        .route("/schedule/:date/:workout_id", delete(unschedule))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/gym-sessions", get(list_gym_sessions).post(record_gym_session))
        .route("/other-sports", get(list_other_sports).post(record_other_sport))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WorkoutDefinition>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(data.workouts))
}

#[instrument(skip(state, body))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<WorkoutInput>,
) -> Result<(StatusCode, Json<WorkoutDefinition>), (StatusCode, String)> {
    let workout =
        journal::services::mutate(&state, user_id, |data| services::create_workout(data, body))
            .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state, body))]
pub async fn update_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<WorkoutInput>,
) -> Result<Json<WorkoutDefinition>, (StatusCode, String)> {
    let workout =
        journal::services::mutate(&state, user_id, |data| services::update_workout(data, id, body))
            .await?;
    Ok(Json(workout))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutDeleted>, (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let summaries = services::delete_workout(data, id)?;
        Ok(WorkoutDeleted {
            id,
            summaries,
            stats: data.stats,
        })
    })
    .await?;
    Ok(Json(res))
}

#[instrument(skip(state, body))]
pub async fn schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<DayEffect<ScheduledWorkout>>), (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let (record, summary) =
            services::schedule_workout(data, body.date, body.workout_id, &body.time)?;
        Ok(DayEffect {
            record,
            summary,
            stats: data.stats,
        })
    })
    .await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state))]
pub async fn unschedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((date, workout_id)): Path<(DateKey, Uuid)>,
) -> Result<Json<DayRefreshed>, (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let summary = services::unschedule_workout(data, date, workout_id)?;
        Ok(DayRefreshed {
            summary,
            stats: data.stats,
        })
    })
    .await?;
    Ok(Json(res))
}

/// GET /gym-sessions?date=&workout_id=
#[instrument(skip(state))]
pub async fn list_gym_sessions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<TrainingFilter>,
) -> Result<Json<Vec<GymSession>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    let sessions = data
        .gym_sessions
        .into_iter()
        .filter(|s| filter.date.map_or(true, |d| s.date == d))
        .filter(|s| filter.workout_id.map_or(true, |w| s.workout_id == w))
        .collect();
    Ok(Json(sessions))
}

#[instrument(skip(state, body))]
pub async fn record_gym_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<GymSessionRequest>,
) -> Result<(StatusCode, Json<DayEffect<GymSession>>), (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let (record, summary) = services::record_gym_session(data, body)?;
        Ok(DayEffect {
            record,
            summary,
            stats: data.stats,
        })
    })
    .await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state))]
pub async fn list_other_sports(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<TrainingFilter>,
) -> Result<Json<Vec<OtherSportRecord>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    let records = data
        .other_sports
        .into_iter()
        .filter(|r| filter.date.map_or(true, |d| r.date == d))
        .filter(|r| filter.workout_id.map_or(true, |w| r.workout_id == w))
        .collect();
    Ok(Json(records))
}

#[instrument(skip(state, body))]
pub async fn record_other_sport(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<OtherSportRequest>,
) -> Result<(StatusCode, Json<DayEffect<OtherSportRecord>>), (StatusCode, String)> {
    let res = journal::services::mutate(&state, user_id, |data| {
        let (record, summary) = services::record_other_sport(data, body)?;
        Ok(DayEffect {
            record,
            summary,
            stats: data.stats,
        })
    })
    .await?;
    Ok((StatusCode::CREATED, Json(res)))
}
