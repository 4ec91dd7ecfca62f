pub mod fairness;
pub mod history;
pub mod ledger;
pub mod types;

pub use fairness::{verification_hash, OutcomeGenerator, ScriptedRolls, ThreadRngGenerator};
pub use history::HistoryLog;
pub use ledger::settle;
pub use types::*;
