use crate::games::types::Roll;

/// Settle a bet against a roll. Returns `(new_balance, win)`.
///
/// Pure: the caller guarantees `0 < bet <= balance`, so a loss never goes below zero.
pub fn settle(balance: u64, bet: u64, roll: Roll) -> (u64, bool) {
    if roll.is_win() {
        (balance.saturating_add(bet), true)
    } else {
        (balance.saturating_sub(bet), false)
    }
}
