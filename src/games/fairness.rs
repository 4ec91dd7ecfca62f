//! Roll generation and the "provably fair" verification hash.
//!
//! The hash is informational only. It is computed over the seed pair and a fresh nonce
//! and attached to each bet so a player can recompute it, but the roll itself is drawn
//! independently from the process RNG and is NOT derived from the hash. Recomputing the
//! hash therefore proves nothing about the roll.

use crate::games::types::Roll;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hex-encoded SHA-256 over `server_seed ‖ client_seed ‖ nonce`
pub fn verification_hash(server_seed: &str, client_seed: &str, nonce: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(server_seed.as_bytes());
    hasher.update(client_seed.as_bytes());
    hasher.update(nonce.as_bytes());
    hex::encode(hasher.finalize())
}

/// Source of rolls and per-bet nonces
pub trait OutcomeGenerator: Send + Sync {
    /// Draw a roll uniformly from 1..=6
    fn roll(&self) -> Roll;

    /// Fresh nonce for one bet
    fn nonce(&self) -> String;

    /// Verification hash for a bet; deterministic in its inputs
    fn verify(&self, server_seed: &str, client_seed: &str, nonce: &str) -> String {
        verification_hash(server_seed, client_seed, nonce)
    }
}

/// Production generator backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngGenerator;

impl OutcomeGenerator for ThreadRngGenerator {
    fn roll(&self) -> Roll {
        Roll::FACES[rand::thread_rng().gen_range(0..Roll::FACES.len())]
    }

    fn nonce(&self) -> String {
        rand::random::<f64>().to_string()
    }
}

/// Deterministic generator that cycles through a fixed sequence of rolls.
///
/// Nonces are the zero-based draw counter, so hashes stay reproducible too.
#[derive(Debug)]
pub struct ScriptedRolls {
    rolls: Vec<Roll>,
    next_roll: AtomicUsize,
    next_nonce: AtomicUsize,
}

impl ScriptedRolls {
    /// Returns `None` for an empty script
    pub fn cycle(rolls: Vec<Roll>) -> Option<Self> {
        if rolls.is_empty() {
            return None;
        }
        Some(Self {
            rolls,
            next_roll: AtomicUsize::new(0),
            next_nonce: AtomicUsize::new(0),
        })
    }

    pub fn always(roll: Roll) -> Self {
        Self {
            rolls: vec![roll],
            next_roll: AtomicUsize::new(0),
            next_nonce: AtomicUsize::new(0),
        }
    }
}

impl OutcomeGenerator for ScriptedRolls {
    fn roll(&self) -> Roll {
        let i = self.next_roll.fetch_add(1, Ordering::SeqCst);
        self.rolls[i % self.rolls.len()]
    }

    fn nonce(&self) -> String {
        self.next_nonce.fetch_add(1, Ordering::SeqCst).to_string()
    }
}
