use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::{
    AppointmentInput, MeasurementInput, NextAppointmentRequest, NutritionistView, WeightInput,
};
use super::services::{
    nutritionist_view, record_appointment, set_next_appointment, upsert_measurements,
    upsert_weight,
};
use crate::{
    auth::services::AuthUser,
    dates::DateKey,
    journal::{
        self,
        model::{Appointment, MeasurementRecord, WeightRecord},
    },
    state::AppState,
};

pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics/weight", get(list_weight).post(record_weight))
        .route(
            "/metrics/measurements",
            get(list_measurements).post(record_measurements),
        )
}

pub fn nutritionist_routes() -> Router<AppState> {
    Router::new()
        .route("/nutritionist", get(get_nutritionist))
        .route("/nutritionist/next-appointment", put(put_next_appointment))
        .route("/nutritionist/appointments", post(post_appointment))
}

#[instrument(skip(state))]
pub async fn list_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WeightRecord>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(data.weight))
}

#[instrument(skip(state, body))]
pub async fn record_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<WeightInput>,
) -> Result<Json<WeightRecord>, (StatusCode, String)> {
    let record =
        journal::services::mutate(&state, user_id, |data| upsert_weight(data, body)).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MeasurementRecord>>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    Ok(Json(data.measurements))
}

#[instrument(skip(state, body))]
pub async fn record_measurements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MeasurementInput>,
) -> Result<Json<MeasurementRecord>, (StatusCode, String)> {
    let record =
        journal::services::mutate(&state, user_id, |data| upsert_measurements(data, body)).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn get_nutritionist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NutritionistView>, (StatusCode, String)> {
    let data = journal::services::read(&state, user_id).await?;
    let today = DateKey::new(OffsetDateTime::now_utc().date());
    Ok(Json(nutritionist_view(&data.nutritionist, today)))
}

/// PUT /nutritionist/next-appointment { date }
#[instrument(skip(state, body))]
pub async fn put_next_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<NextAppointmentRequest>,
) -> Result<Json<NutritionistView>, (StatusCode, String)> {
    let today = DateKey::new(OffsetDateTime::now_utc().date());
    let view = journal::services::mutate(&state, user_id, |data| {
        set_next_appointment(data, body.date);
        Ok(nutritionist_view(&data.nutritionist, today))
    })
    .await?;
    Ok(Json(view))
}

#[instrument(skip(state, body))]
pub async fn post_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AppointmentInput>,
) -> Result<(StatusCode, Json<Appointment>), (StatusCode, String)> {
    let appointment =
        journal::services::mutate(&state, user_id, |data| record_appointment(data, body)).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[cfg(test)]
mod tests {
    use crate::testing::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn weight_and_measurements_round_trip_through_api() {
        let t = TestApp::new();
        let (status, _) = t
            .request(
                "POST",
                "/api/v1/metrics/weight",
                Some(json!({ "date": "2026-10-12", "value": 70.4, "notes": "en ayunas" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = t.request("GET", "/api/v1/metrics/weight", None).await;
        assert_eq!(list[0]["value"], 70.4);
        assert_eq!(list[0]["notes"], "en ayunas");

        let (status, body) = t
            .request(
                "POST",
                "/api/v1/metrics/measurements",
                Some(json!({ "date": "2026-10-12", "waist": 79.0, "hips": 95.5 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hips"], 95.5);

        let (status, _) = t
            .request(
                "POST",
                "/api/v1/metrics/measurements",
                Some(json!({ "date": "2026-10-12" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn nutritionist_visits_through_api() {
        let t = TestApp::new();
        let (_, view) = t.request("GET", "/api/v1/nutritionist", None).await;
        assert_eq!(view["next_appointment"], serde_json::Value::Null);
        assert_eq!(view["appointments"], json!([]));

        let (status, view) = t
            .request(
                "PUT",
                "/api/v1/nutritionist/next-appointment",
                Some(json!({ "date": "2026-11-02" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["next_appointment"], "2026-11-02");
        assert!(view["days_until"].is_i64());

        let (status, visit) = t
            .request(
                "POST",
                "/api/v1/nutritionist/appointments",
                Some(json!({ "date": "2026-11-02", "weight": 69.8, "feedback": "muy bien" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(visit["weight"], 69.8);

        let (_, view) = t.request("GET", "/api/v1/nutritionist", None).await;
        assert_eq!(view["next_appointment"], serde_json::Value::Null);
        assert_eq!(view["appointments"][0]["feedback"], "muy bien");

        let (status, _) = t
            .request(
                "PUT",
                "/api/v1/nutritionist/next-appointment",
                Some(json!({ "date": "02/11/2026" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
