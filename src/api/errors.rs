//! API Error Handling
//!
//! Maps engine failures onto the `{"error": "..."}` bodies clients expect. Internal
//! details are logged with the request id and never returned.

use super::models::ErrorResponse;
use crate::errors::GameError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

/// API error with request tracking
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub request_id: String,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    InvalidBet,
    MalformedRequest(String),
    NotFound,
    InternalError(String),
}

impl ApiError {
    pub fn invalid_bet(request_id: String) -> Self {
        Self {
            kind: ApiErrorKind::InvalidBet,
            request_id,
        }
    }

    pub fn malformed_request(request_id: String, detail: String) -> Self {
        Self {
            kind: ApiErrorKind::MalformedRequest(detail),
            request_id,
        }
    }

    pub fn not_found(request_id: String) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            request_id,
        }
    }

    pub fn internal_error(request_id: String, detail: String) -> Self {
        Self {
            kind: ApiErrorKind::InternalError(detail),
            request_id,
        }
    }

    /// Translate an engine error raised while serving `request_id`
    pub fn from_game(request_id: String, error: GameError) -> Self {
        match error {
            GameError::InvalidBet { .. } => Self::invalid_bet(request_id),
            GameError::Storage(e) => Self::internal_error(request_id, e.to_string()),
            GameError::Interrupted(e) => Self::internal_error(request_id, e.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::InvalidBet | ApiErrorKind::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiErrorKind::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    pub fn public_message(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::InvalidBet => "Invalid Bet",
            ApiErrorKind::MalformedRequest(_) => "Malformed Request",
            ApiErrorKind::NotFound => "Not Found",
            ApiErrorKind::InternalError(_) => "Internal Server Error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ApiErrorKind::InvalidBet => write!(f, "[{}] Invalid Bet", self.request_id),
            ApiErrorKind::MalformedRequest(msg) => {
                write!(f, "[{}] Malformed Request: {}", self.request_id, msg)
            }
            ApiErrorKind::NotFound => write!(f, "[{}] Not Found", self.request_id),
            ApiErrorKind::InternalError(msg) => {
                write!(f, "[{}] Internal Error: {}", self.request_id, msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.kind {
            ApiErrorKind::InternalError(_) => tracing::error!("{}", self),
            ApiErrorKind::MalformedRequest(_) => tracing::warn!("{}", self),
            _ => tracing::debug!("{}", self),
        }

        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
