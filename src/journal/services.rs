use axum::http::StatusCode;
use tracing::error;
use uuid::Uuid;

use super::model::UserData;
use crate::plan::parser::PlanParseError;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Plan(#[from] PlanParseError),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<JournalError> for (StatusCode, String) {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            JournalError::Invalid(_) => (StatusCode::BAD_REQUEST, e.to_string()),
            JournalError::Plan(PlanParseError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            JournalError::Plan(_) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            JournalError::Storage(err) => {
                error!(error = %err, "journal storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage error".into())
            }
        }
    }
}

/// Snapshot of a user's journal; empty if nothing was stored yet.
pub async fn read(st: &AppState, user_id: Uuid) -> Result<UserData, JournalError> {
    Ok(st.journals.load(user_id).await?.unwrap_or_default())
}

/// Load, apply `f`, save. The per-user lock is held for the whole cycle and
/// nothing is written when `f` fails.
pub async fn mutate<R>(
    st: &AppState,
    user_id: Uuid,
    f: impl FnOnce(&mut UserData) -> Result<R, JournalError>,
) -> Result<R, JournalError> {
    let _guard = st.locks.acquire(user_id).await;
    let mut data = st.journals.load(user_id).await?.unwrap_or_default();
    let out = f(&mut data)?;
    st.journals.save(user_id, &data).await?;
    Ok(out)
}
