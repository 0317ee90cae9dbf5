mod dto;
pub mod handlers;
pub mod parser;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router(max_text_bytes: usize) -> Router<AppState> {
    handlers::plan_routes(max_text_bytes)
}
