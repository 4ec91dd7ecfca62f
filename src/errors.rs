//! Error types for the fairdice wagering engine
//!
//! Storage, game and configuration failures each get their own enum; `FairDiceError`
//! is the root type used by the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Backing store failures. Fatal to the enclosing transaction, never retried.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Read failed for {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed for {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupted data in {}: {source}", .path.display())]
    CorruptedData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode state: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

/// Wagering transaction errors
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid bet {bet} against balance {balance}")]
    InvalidBet { bet: i64, balance: u64 },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Transaction task failed: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Root error type for the service
#[derive(Debug, Error)]
pub enum FairDiceError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type GameResult<T> = Result<T, GameError>;
pub type FairDiceResult<T> = Result<T, FairDiceError>;
