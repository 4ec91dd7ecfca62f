//! API Request/Response Models

use serde::{Deserialize, Serialize};

/// POST /roll-dice body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRequest {
    pub bet: serde_json::Number,
}

impl BetRequest {
    /// Whole-unit stake, saturated to the `i64` range.
    ///
    /// `None` for amounts with a fractional part, which no balance can settle.
    pub fn stake(&self) -> Option<i64> {
        if let Some(bet) = self.bet.as_i64() {
            return Some(bet);
        }
        if self.bet.is_u64() {
            return Some(i64::MAX);
        }
        let bet = self.bet.as_f64()?;
        // Float to int casts saturate
        (bet.fract() == 0.0).then_some(bet as i64)
    }
}

/// GET /balance response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

/// POST /reset-game response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub balance: u64,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
