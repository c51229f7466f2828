use soroban_sdk::{Address, Env, Symbol};

use crate::types::Lock;

/// Emitted when a new lock is created.
///
/// # Topics
/// * `Symbol` - "locked"
/// * `Address` - The account owning the lock
///
/// # Data
/// * `u64` - Lock id
/// * `Address` - Locked asset
/// * `i128` - Principal amount
/// * `u64` - Duration in seconds
/// * `u64` - Maturity timestamp
pub fn emit_locked(e: &Env, lock: &Lock) {
    let topics = (Symbol::new(e, "locked"), lock.owner.clone());
    let data = (
        lock.id,
        lock.asset.clone(),
        lock.amount,
        lock.duration,
        lock.unlock_at,
    );
    e.events().publish(topics, data);
}

/// Emitted when a matured lock is withdrawn.
///
/// # Topics
/// * `Symbol` - "withdrawn"
/// * `Address` - The account owning the lock
///
/// # Data
/// * `u64` - Lock id
/// * `Address` - Locked asset
/// * `i128` - Principal returned
/// * `i128` - Yield paid on top of principal
pub fn emit_withdrawn(e: &Env, owner: &Address, id: u64, asset: &Address, amount: i128, yield_paid: i128) {
    let topics = (Symbol::new(e, "withdrawn"), owner.clone());
    let data = (id, asset.clone(), amount, yield_paid);
    e.events().publish(topics, data);
}

/// Emitted when a lock is exited early at a penalty.
///
/// # Topics
/// * `Symbol` - "emergency_withdrawn"
/// * `Address` - The account owning the lock
///
/// # Data
/// * `u64` - Lock id
/// * `Address` - Locked asset
/// * `i128` - Net payout to the owner
/// * `i128` - Penalty retained in ledger custody
pub fn emit_emergency_withdrawn(
    e: &Env,
    owner: &Address,
    id: u64,
    asset: &Address,
    payout: i128,
    penalty: i128,
) {
    let topics = (Symbol::new(e, "emergency_withdrawn"), owner.clone());
    let data = (id, asset.clone(), payout, penalty);
    e.events().publish(topics, data);
}

/// Emitted when the reward rate changes. Data: `(old_bps, new_bps)`.
pub fn emit_reward_rate_updated(e: &Env, old_bps: u32, new_bps: u32) {
    e.events()
        .publish((Symbol::new(e, "reward_rate_updated"),), (old_bps, new_bps));
}

/// Emitted when the duration bounds change.
/// Data: `(old_min, old_max, new_min, new_max)`.
pub fn emit_duration_bounds_updated(
    e: &Env,
    old_min: u64,
    old_max: u64,
    new_min: u64,
    new_max: u64,
) {
    e.events().publish(
        (Symbol::new(e, "duration_bounds_updated"),),
        (old_min, old_max, new_min, new_max),
    );
}

/// Emitted when the early-exit penalty changes. Data: `(old_bps, new_bps)`.
pub fn emit_penalty_updated(e: &Env, old_bps: u32, new_bps: u32) {
    e.events()
        .publish((Symbol::new(e, "penalty_updated"),), (old_bps, new_bps));
}

/// Emitted when the ledger is paused. Data: `(old, new)` paused flags.
pub fn emit_paused(e: &Env, old: bool, new: bool) {
    e.events().publish((Symbol::new(e, "paused"),), (old, new));
}

/// Emitted when the ledger is unpaused. Data: `(old, new)` paused flags.
pub fn emit_unpaused(e: &Env, old: bool, new: bool) {
    e.events().publish((Symbol::new(e, "unpaused"),), (old, new));
}

/// Emitted when forfeited penalties are swept to a recipient.
///
/// # Topics
/// * `Symbol` - "forfeited_swept"
/// * `Address` - The swept asset
///
/// # Data
/// * `Address` - Recipient of the sweep
/// * `i128` - Amount swept
pub fn emit_forfeited_swept(e: &Env, asset: &Address, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "forfeited_swept"), asset.clone());
    let data = (recipient.clone(), amount);
    e.events().publish(topics, data);
}
