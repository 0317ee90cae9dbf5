mod dto;
pub mod evaluator;
pub mod handlers;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::summary_routes())
        .merge(handlers::partner_routes())
}
