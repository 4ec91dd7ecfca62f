//! HTTP transport for the wagering engine
//!
//! Exposes the coordinator over the legacy dice-game routes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{build_app, ApiServer};
