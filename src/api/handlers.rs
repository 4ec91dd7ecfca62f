//! Request Handlers
//!
//! Thin wrappers that decode the request, call the coordinator and encode the result.

use super::{
    errors::ApiError,
    middleware::RequestId,
    models::{BalanceResponse, BetRequest, ResetResponse},
};
use crate::{
    coordinator::TransactionCoordinator,
    games::{BetReceipt, HistoryRecord},
};
use axum::{body::Bytes, extract::State, Extension, Json};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub coordinator: Arc<TransactionCoordinator>,
}

/// Place a bet
/// POST /roll-dice
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn roll_dice_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BetReceipt>, ApiError> {
    let request: BetRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::malformed_request(request_id.0.clone(), e.to_string()))?;
    let bet = request
        .stake()
        .ok_or_else(|| ApiError::invalid_bet(request_id.0.clone()))?;

    let receipt = state
        .coordinator
        .place_bet(bet)
        .await
        .map_err(|e| ApiError::from_game(request_id.0, e))?;

    Ok(Json(receipt))
}

/// GET /balance
pub async fn balance_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state
        .coordinator
        .balance()
        .await
        .map_err(|e| ApiError::from_game(request_id.0, e))?;

    Ok(Json(BalanceResponse { balance }))
}

/// Full history, oldest first
/// GET /game-history
pub async fn history_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let history = state
        .coordinator
        .history()
        .await
        .map_err(|e| ApiError::from_game(request_id.0, e))?;

    Ok(Json(history.into_records()))
}

/// POST /reset-game
pub async fn reset_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, ApiError> {
    let restored = state
        .coordinator
        .reset()
        .await
        .map_err(|e| ApiError::from_game(request_id.0, e))?;

    Ok(Json(ResetResponse {
        success: true,
        balance: restored.balance,
    }))
}

/// Catch-all for unknown routes and wrong methods
pub async fn not_found_handler(Extension(request_id): Extension<RequestId>) -> ApiError {
    ApiError::not_found(request_id.0)
}
