//! Currency ledger — balances, round payouts, and the upgrade queue.
//!
//! Owned by the engine and injected at construction so tests can pre-fund
//! accounts. Written only at round end, read only at round start.

use std::collections::HashMap;

use tracing::debug;

use powergrab_core::constants::*;
use powergrab_core::enums::{UpgradeId, WinReason};

/// One player's meta-progression account.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub balance: u32,
    pub total_earned: u32,
    /// Earnings from the most recent round (shown during intermission).
    pub recent_earnings: u32,
    /// Upgrades bought but not yet applied; drained at the next round start.
    pub queued: Vec<UpgradeId>,
}

/// Currency accounts for all player slots.
#[derive(Debug, Clone, Default)]
pub struct CurrencyLedger {
    accounts: HashMap<u8, Account>,
}

impl CurrencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance for a slot (0 for an account never touched).
    pub fn currency(&self, slot: u8) -> u32 {
        self.accounts.get(&slot).map_or(0, |a| a.balance)
    }

    pub fn account(&self, slot: u8) -> Option<&Account> {
        self.accounts.get(&slot)
    }

    /// Add currency to a slot's balance.
    pub fn award(&mut self, slot: u8, amount: u32) {
        let account = self.accounts.entry(slot).or_default();
        account.balance += amount;
        account.total_earned += amount;
        account.recent_earnings += amount;
        debug!(slot, amount, balance = account.balance, "currency awarded");
    }

    /// Deduct a cost if the balance covers it. Returns false (and leaves the
    /// account untouched) when it does not.
    pub fn spend(&mut self, slot: u8, cost: u32) -> bool {
        let account = self.accounts.entry(slot).or_default();
        if account.balance < cost {
            return false;
        }
        account.balance -= cost;
        true
    }

    /// Queue a purchased upgrade for the next round.
    pub fn queue_upgrade(&mut self, slot: u8, upgrade: UpgradeId) {
        self.accounts.entry(slot).or_default().queued.push(upgrade);
    }

    /// Drain the upgrade queue for a slot. Called exactly once per player
    /// per round, at round start. Also resets the recent-earnings readout.
    pub fn pull_queued(&mut self, slot: u8) -> Vec<UpgradeId> {
        let account = self.accounts.entry(slot).or_default();
        account.recent_earnings = 0;
        std::mem::take(&mut account.queued)
    }
}

/// Currency earned for a round: everyone gets a score-based floor-1 base,
/// the winner adds a bonus keyed on how the round was won.
pub fn round_payout(score: i32, won: Option<WinReason>) -> u32 {
    let base = ((score.max(0) as f32) * 0.5).round().max(1.0) as u32;
    base + won.map_or(0, win_bonus)
}

/// Winner bonus per win reason.
pub fn win_bonus(reason: WinReason) -> u32 {
    match reason {
        WinReason::Tag => WIN_BONUS_TAG,
        WinReason::Score => WIN_BONUS_SCORE,
        WinReason::Knockout => WIN_BONUS_KNOCKOUT,
        WinReason::Timer => WIN_BONUS_TIMER,
        WinReason::Debt => WIN_BONUS_DEBT,
    }
}
