//! Fairdice - single-player dice wagering engine
//!
//! A player bets part of a virtual balance on a six-sided die roll: 4, 5 or 6 doubles the
//! stake, anything lower loses it. Every settled bet is appended to a durable history
//! together with a SHA-256 verification hash over the seed pair and a per-bet nonce.
//!
//! The engine is `TransactionCoordinator`; `api` exposes it over HTTP.

pub mod api;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod games;
pub mod storage;

pub use coordinator::TransactionCoordinator;
pub use errors::{FairDiceError, FairDiceResult, GameError, StorageError};
pub use storage::{JsonFileStore, MemoryStore, PersistenceStore};
