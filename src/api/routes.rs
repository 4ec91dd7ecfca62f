//! Route Definitions

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints.
///
/// Known paths hit with the wrong method fall through to the same 404 as unknown paths.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/roll-dice", post(roll_dice_handler).fallback(not_found_handler))
        .route("/balance", get(balance_handler).fallback(not_found_handler))
        .route("/game-history", get(history_handler).fallback(not_found_handler))
        .route("/reset-game", post(reset_handler).fallback(not_found_handler))
        .fallback(not_found_handler)
        .with_state(state)
}
