//! Wagering transaction coordinator
//!
//! Every mutating operation runs load → validate → roll → settle → append → save while
//! holding the write half of one lock, so two bets can never read the same balance.
//! Reads share the read half and always observe a fully committed state.
//!
//! Once a write guard is acquired the transaction runs on its own task and owns the
//! guard, so dropping the caller (client disconnect, request timeout) cannot release
//! the lock before the save has finished.

use crate::{
    errors::{GameError, GameResult},
    games::{settle, BetReceipt, HistoryLog, HistoryRecord, OutcomeGenerator, PersistedState, Seeds},
    storage::PersistenceStore,
};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct TransactionCoordinator {
    store: Arc<dyn PersistenceStore>,
    generator: Arc<dyn OutcomeGenerator>,
    seeds: Seeds,
    guard: Arc<RwLock<()>>,
}

impl TransactionCoordinator {
    pub fn new(
        store: Arc<dyn PersistenceStore>,
        generator: Arc<dyn OutcomeGenerator>,
        seeds: Seeds,
    ) -> Self {
        Self {
            store,
            generator,
            seeds,
            guard: Arc::new(RwLock::new(())),
        }
    }

    pub fn seeds(&self) -> &Seeds {
        &self.seeds
    }

    /// Place one bet and commit its outcome.
    ///
    /// Fails with `InvalidBet` when `bet <= 0` or `bet > balance`; nothing is written then.
    pub async fn place_bet(&self, bet: i64) -> GameResult<BetReceipt> {
        let write = self.guard.clone().write_owned().await;
        let store = self.store.clone();
        let generator = self.generator.clone();
        let seeds = self.seeds.clone();

        tokio::spawn(async move {
            let _write = write;
            commit_bet(store.as_ref(), generator.as_ref(), &seeds, bet).await
        })
        .await?
    }

    pub async fn balance(&self) -> GameResult<u64> {
        let _read = self.guard.read().await;
        Ok(self.store.load().await?.balance)
    }

    pub async fn history(&self) -> GameResult<HistoryLog> {
        let _read = self.guard.read().await;
        Ok(self.store.load().await?.history)
    }

    /// Restore the default balance and drop all history, whatever the prior state
    pub async fn reset(&self) -> GameResult<PersistedState> {
        let write = self.guard.clone().write_owned().await;
        let store = self.store.clone();

        tokio::spawn(async move {
            let _write = write;
            tracing::info!("Resetting game");
            let state = PersistedState::default();
            store.save(&state).await?;
            Ok::<_, GameError>(state)
        })
        .await?
    }
}

/// The bet transaction proper; callers must hold the write guard
async fn commit_bet(
    store: &dyn PersistenceStore,
    generator: &dyn OutcomeGenerator,
    seeds: &Seeds,
    bet: i64,
) -> GameResult<BetReceipt> {
    let PersistedState {
        balance,
        mut history,
    } = store.load().await?;

    let stake = match u64::try_from(bet) {
        Ok(stake) if stake > 0 && stake <= balance => stake,
        _ => {
            tracing::warn!(bet, balance, "Rejected bet");
            return Err(GameError::InvalidBet { bet, balance });
        }
    };

    let roll = generator.roll();
    let nonce = generator.nonce();
    let hash = generator.verify(&seeds.server_seed, &seeds.client_seed, &nonce);

    let (new_balance, win) = settle(balance, stake, roll);

    history.append(HistoryRecord {
        roll,
        bet: stake,
        win,
        new_balance,
        hash: hash.clone(),
        server_seed: seeds.server_seed.clone(),
        client_seed: seeds.client_seed.clone(),
        nonce,
        timestamp: HistoryRecord::now(),
    });

    store
        .save(&PersistedState {
            balance: new_balance,
            history,
        })
        .await?;

    tracing::info!(%roll, bet = stake, win, new_balance, "Bet settled");

    Ok(BetReceipt {
        roll,
        win,
        new_balance,
        hash,
    })
}
