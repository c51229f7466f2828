//! Token Lock Ledger Contract
//!
//! Accounts deposit a fungible asset for a bounded time window, accrue yield
//! on the deposited balance, and later withdraw principal plus yield, or
//! exit early at a penalty. Settled locks are soft-deleted: history stays
//! queryable forever.
//!
//! ## Key design decisions
//!
//! - **Arena + compartment lists**: locks live in an arena keyed by a global
//!   monotonically increasing id; each account's compartment is an ordered
//!   list of ids. Compartments are disjoint and lookups are scoped to the
//!   caller's own list, so a foreign id and a nonexistent id fail identically.
//! - **Derived aggregates**: per-(account, asset) unsettled principal and
//!   per-account active counts are maintained in lockstep with every mutation
//!   for O(1) reads; the lock arena stays the source of truth.
//! - **Checks-Effects-Interactions**: settlement state is written *before*
//!   outbound token transfers; a failed transfer traps and the host rolls the
//!   whole invocation back.
//! - **Typed errors**: every rejection is a wire-stable `Error` code raised
//!   via `panic_with_error!`, never a free-text panic.
//! - **Auth-gated mutations**: `owner.require_auth()` on create/withdraw;
//!   policy updates and sweeps are admin-only.

#![no_std]

mod errors;
mod events;
mod reward;
mod types;

pub use errors::{Error, ErrorCategory, ErrorExt};
pub use reward::{BPS_DENOMINATOR, SECONDS_PER_YEAR};
pub use types::{Lock, Policy};

use types::DataKey;

use soroban_sdk::{contract, contractimpl, panic_with_error, token::TokenClient, Address, Env, Vec};

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test_queries;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_admin(e: &Env, caller: &Address) {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(e, Error::NotInitialized));
    if stored != *caller {
        panic_with_error!(e, Error::Unauthorized);
    }
}

fn read_policy(e: &Env) -> Policy {
    e.storage()
        .instance()
        .get(&DataKey::Policy)
        .unwrap_or_else(|| panic_with_error!(e, Error::NotInitialized))
}

fn write_policy(e: &Env, policy: &Policy) {
    e.storage().instance().set(&DataKey::Policy, policy);
}

fn validate_rate(e: &Env, rate_bps: u32) {
    if rate_bps > 10_000 {
        panic_with_error!(e, Error::RateOutOfRange);
    }
}

fn validate_duration_bounds(e: &Env, min_duration: u64, max_duration: u64) {
    if min_duration == 0 || max_duration <= min_duration {
        panic_with_error!(e, Error::DurationBoundsInvalid);
    }
}

fn validate_penalty(e: &Env, penalty_bps: u32) {
    if penalty_bps >= 10_000 {
        panic_with_error!(e, Error::PenaltyOutOfRange);
    }
}

/// Assign the next global lock id. Ids start at 1 and are never reused.
fn next_lock_id(e: &Env) -> u64 {
    let id: u64 = e
        .storage()
        .instance()
        .get(&DataKey::NextLockId)
        .unwrap_or(1);
    let next = id
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, Error::Overflow));
    e.storage().instance().set(&DataKey::NextLockId, &next);
    id
}

fn compartment_ids(e: &Env, account: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&DataKey::AccountLocks(account.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

fn read_lock(e: &Env, lock_id: u64) -> Lock {
    e.storage()
        .persistent()
        .get(&DataKey::Lock(lock_id))
        .unwrap_or_else(|| panic_with_error!(e, Error::LockNotFound))
}

/// Load a lock by id, scoped to `account`'s compartment. A nonexistent id
/// and another account's id fail identically with `LockNotFound`.
fn compartment_lock(e: &Env, account: &Address, lock_id: u64) -> Lock {
    if !compartment_ids(e, account).contains(&lock_id) {
        panic_with_error!(e, Error::LockNotFound);
    }
    read_lock(e, lock_id)
}

fn write_lock(e: &Env, lock: &Lock) {
    e.storage().persistent().set(&DataKey::Lock(lock.id), lock);
}

fn read_balance(e: &Env, account: &Address, asset: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone(), asset.clone()))
        .unwrap_or(0)
}

fn add_balance(e: &Env, account: &Address, asset: &Address, delta: i128) {
    let balance = read_balance(e, account, asset)
        .checked_add(delta)
        .unwrap_or_else(|| panic_with_error!(e, Error::Overflow));
    e.storage()
        .persistent()
        .set(&DataKey::Balance(account.clone(), asset.clone()), &balance);
}

fn read_active_count(e: &Env, account: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::ActiveCount(account.clone()))
        .unwrap_or(0)
}

fn set_active_count(e: &Env, account: &Address, count: u32) {
    e.storage()
        .persistent()
        .set(&DataKey::ActiveCount(account.clone()), &count);
}

fn read_forfeited(e: &Env, asset: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Forfeited(asset.clone()))
        .unwrap_or(0)
}

/// Write the settled `lock` and decrement the derived aggregates by its
/// principal. Shared by both withdrawal paths.
fn settle(e: &Env, lock: &Lock) {
    write_lock(e, lock);
    add_balance(e, &lock.owner, &lock.asset, -lock.amount);
    set_active_count(e, &lock.owner, read_active_count(e, &lock.owner).saturating_sub(1));
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct LockLedger;

#[contractimpl]
impl LockLedger {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization: stores `admin` and the initial policy.
    /// Policy arguments are validated exactly as the setters validate them.
    pub fn initialize(
        e: Env,
        admin: Address,
        reward_rate_bps: u32,
        min_duration: u64,
        max_duration: u64,
        early_exit_penalty_bps: u32,
    ) {
        if e.storage().instance().has(&DataKey::Admin) {
            panic_with_error!(&e, Error::AlreadyInitialized);
        }
        validate_rate(&e, reward_rate_bps);
        validate_duration_bounds(&e, min_duration, max_duration);
        validate_penalty(&e, early_exit_penalty_bps);

        e.storage().instance().set(&DataKey::Admin, &admin);
        write_policy(
            &e,
            &Policy {
                reward_rate_bps,
                min_duration,
                max_duration,
                early_exit_penalty_bps,
                paused: false,
            },
        );
    }

    // ── Lock lifecycle ─────────────────────────────────────────────────────

    /// Lock `amount` of `asset` for `duration` seconds.
    ///
    /// Requirements:
    /// - Ledger not paused
    /// - `amount` > 0
    /// - `min_duration <= duration <= max_duration`
    /// - Caller has approved the contract to spend `amount`
    ///
    /// Pulls the principal into ledger custody, then records the lock in the
    /// caller's compartment. If the inbound transfer fails nothing is
    /// recorded.
    pub fn create_lock(e: Env, owner: Address, asset: Address, amount: i128, duration: u64) -> Lock {
        owner.require_auth();

        let policy = read_policy(&e);
        if policy.paused {
            panic_with_error!(&e, Error::Paused);
        }
        if asset == e.current_contract_address() {
            panic_with_error!(&e, Error::InvalidAsset);
        }
        if amount <= 0 {
            panic_with_error!(&e, Error::InvalidAmount);
        }
        if duration < policy.min_duration || duration > policy.max_duration {
            panic_with_error!(&e, Error::DurationOutOfRange);
        }

        let created_at = e.ledger().timestamp();
        let unlock_at = created_at
            .checked_add(duration)
            .unwrap_or_else(|| panic_with_error!(&e, Error::Overflow));

        // Pull the principal in first (caller must have approved).
        let contract = e.current_contract_address();
        if TokenClient::new(&e, &asset)
            .try_transfer_from(&contract, &owner, &contract, &amount)
            .is_err()
        {
            panic_with_error!(&e, Error::TransferFailed);
        }

        let id = next_lock_id(&e);
        let lock = Lock {
            id,
            owner: owner.clone(),
            asset: asset.clone(),
            amount,
            created_at,
            unlock_at,
            duration,
            settled: false,
            yield_paid: 0,
        };
        write_lock(&e, &lock);

        let mut ids = compartment_ids(&e, &owner);
        ids.push_back(id);
        e.storage()
            .persistent()
            .set(&DataKey::AccountLocks(owner.clone()), &ids);

        add_balance(&e, &owner, &asset, amount);
        set_active_count(&e, &owner, read_active_count(&e, &owner).saturating_add(1));

        events::emit_locked(&e, &lock);
        lock
    }

    /// Withdraw a matured lock: pays principal plus accrued yield.
    ///
    /// The maturity boundary is inclusive: `now == unlock_at` succeeds.
    /// Accrual is capped at one full duration even if settlement is delayed.
    /// Allowed while paused: existing funds are always recoverable.
    pub fn withdraw(e: Env, owner: Address, lock_id: u64) -> Lock {
        owner.require_auth();

        let mut lock = compartment_lock(&e, &owner, lock_id);
        if lock.settled {
            panic_with_error!(&e, Error::AlreadySettled);
        }
        let now = e.ledger().timestamp();
        if now < lock.unlock_at {
            panic_with_error!(&e, Error::NotYetUnlocked);
        }

        let policy = read_policy(&e);
        let yield_paid = reward::accrued(
            &e,
            lock.amount,
            policy.reward_rate_bps,
            lock.created_at,
            lock.duration,
            now,
        );

        // CEI: settle before transfer.
        lock.settled = true;
        lock.yield_paid = yield_paid;
        settle(&e, &lock);

        let payout = lock
            .amount
            .checked_add(yield_paid)
            .unwrap_or_else(|| panic_with_error!(&e, Error::Overflow));
        let contract = e.current_contract_address();
        if TokenClient::new(&e, &lock.asset)
            .try_transfer(&contract, &owner, &payout)
            .is_err()
        {
            panic_with_error!(&e, Error::TransferFailed);
        }

        events::emit_withdrawn(&e, &owner, lock.id, &lock.asset, lock.amount, yield_paid);
        lock
    }

    /// Exit an immature lock early at the configured penalty.
    ///
    /// Strictly before maturity only: once `now >= unlock_at` this path is
    /// closed and `withdraw` applies. No yield is paid; the penalty stays in
    /// ledger custody as a forfeited balance. Allowed while paused.
    pub fn emergency_withdraw(e: Env, owner: Address, lock_id: u64) -> Lock {
        owner.require_auth();

        let mut lock = compartment_lock(&e, &owner, lock_id);
        if lock.settled {
            panic_with_error!(&e, Error::AlreadySettled);
        }
        let now = e.ledger().timestamp();
        if now >= lock.unlock_at {
            panic_with_error!(&e, Error::StillLocked);
        }

        let policy = read_policy(&e);
        let penalty = reward::penalty(&e, lock.amount, policy.early_exit_penalty_bps);
        let payout = lock.amount - penalty;

        // CEI: settle before transfer. yield_paid stays 0 on early exit.
        lock.settled = true;
        settle(&e, &lock);

        let forfeited = read_forfeited(&e, &lock.asset)
            .checked_add(penalty)
            .unwrap_or_else(|| panic_with_error!(&e, Error::Overflow));
        e.storage()
            .persistent()
            .set(&DataKey::Forfeited(lock.asset.clone()), &forfeited);

        let contract = e.current_contract_address();
        if TokenClient::new(&e, &lock.asset)
            .try_transfer(&contract, &owner, &payout)
            .is_err()
        {
            panic_with_error!(&e, Error::TransferFailed);
        }

        events::emit_emergency_withdrawn(&e, &owner, lock.id, &lock.asset, payout, penalty);
        lock
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// All locks of `account` in creation order, settled ones included.
    pub fn locks_of(e: Env, account: Address) -> Vec<Lock> {
        let mut locks = Vec::new(&e);
        for id in compartment_ids(&e, &account).iter() {
            locks.push_back(read_lock(&e, id));
        }
        locks
    }

    /// Unsettled locks of `account` in creation order.
    pub fn active_locks_of(e: Env, account: Address) -> Vec<Lock> {
        let mut locks = Vec::new(&e);
        for id in compartment_ids(&e, &account).iter() {
            let lock = read_lock(&e, id);
            if !lock.settled {
                locks.push_back(lock);
            }
        }
        locks
    }

    /// Total number of locks ever created by `account`.
    pub fn lock_count(e: Env, account: Address) -> u32 {
        compartment_ids(&e, &account).len()
    }

    /// Number of unsettled locks of `account`. O(1), from the derived counter.
    pub fn active_lock_count(e: Env, account: Address) -> u32 {
        read_active_count(&e, &account)
    }

    /// Live sum of accrued yield over all unsettled locks of `account`.
    /// Recomputed on every read; never cached, since accrual is monotonic.
    pub fn total_pending_yield(e: Env, account: Address) -> i128 {
        let policy = read_policy(&e);
        let now = e.ledger().timestamp();
        let mut total: i128 = 0;
        for id in compartment_ids(&e, &account).iter() {
            let lock = read_lock(&e, id);
            if lock.settled {
                continue;
            }
            let pending = reward::accrued(
                &e,
                lock.amount,
                policy.reward_rate_bps,
                lock.created_at,
                lock.duration,
                now,
            );
            total = total
                .checked_add(pending)
                .unwrap_or_else(|| panic_with_error!(&e, Error::Overflow));
        }
        total
    }

    /// One lock of `account` by id. `LockNotFound` for foreign or missing ids.
    pub fn lock_details(e: Env, account: Address, lock_id: u64) -> Lock {
        compartment_lock(&e, &account, lock_id)
    }

    /// Aggregate unsettled principal of `account` in `asset`. O(1).
    pub fn balance_of(e: Env, account: Address, asset: Address) -> i128 {
        read_balance(&e, &account, &asset)
    }

    /// Forfeited early-exit penalties currently held in custody for `asset`.
    pub fn forfeited_balance(e: Env, asset: Address) -> i128 {
        read_forfeited(&e, &asset)
    }

    /// Current policy snapshot.
    pub fn get_policy(e: Env) -> Policy {
        read_policy(&e)
    }

    /// Returns `true` if the lock has reached maturity.
    pub fn is_matured(e: Env, account: Address, lock_id: u64) -> bool {
        let lock = compartment_lock(&e, &account, lock_id);
        e.ledger().timestamp() >= lock.unlock_at
    }

    /// Seconds remaining until maturity; 0 once matured.
    pub fn time_remaining(e: Env, account: Address, lock_id: u64) -> u64 {
        let lock = compartment_lock(&e, &account, lock_id);
        let now = e.ledger().timestamp();
        if now >= lock.unlock_at {
            0
        } else {
            lock.unlock_at - now
        }
    }

    // ── Policy administration ──────────────────────────────────────────────

    /// Set the annualized reward rate (admin only, 0-10000 bps).
    pub fn set_reward_rate(e: Env, caller: Address, rate_bps: u32) {
        require_admin(&e, &caller);
        validate_rate(&e, rate_bps);
        let mut policy = read_policy(&e);
        let old = policy.reward_rate_bps;
        policy.reward_rate_bps = rate_bps;
        write_policy(&e, &policy);
        events::emit_reward_rate_updated(&e, old, rate_bps);
    }

    /// Set the accepted duration window (admin only, 0 < min < max).
    pub fn set_duration_bounds(e: Env, caller: Address, min_duration: u64, max_duration: u64) {
        require_admin(&e, &caller);
        validate_duration_bounds(&e, min_duration, max_duration);
        let mut policy = read_policy(&e);
        let (old_min, old_max) = (policy.min_duration, policy.max_duration);
        policy.min_duration = min_duration;
        policy.max_duration = max_duration;
        write_policy(&e, &policy);
        events::emit_duration_bounds_updated(&e, old_min, old_max, min_duration, max_duration);
    }

    /// Set the early-exit penalty (admin only, strictly below 10000 bps).
    pub fn set_early_exit_penalty(e: Env, caller: Address, penalty_bps: u32) {
        require_admin(&e, &caller);
        validate_penalty(&e, penalty_bps);
        let mut policy = read_policy(&e);
        let old = policy.early_exit_penalty_bps;
        policy.early_exit_penalty_bps = penalty_bps;
        write_policy(&e, &policy);
        events::emit_penalty_updated(&e, old, penalty_bps);
    }

    /// Pause lock creation (admin only). Settlement stays open.
    pub fn pause(e: Env, caller: Address) {
        require_admin(&e, &caller);
        let mut policy = read_policy(&e);
        let old = policy.paused;
        policy.paused = true;
        write_policy(&e, &policy);
        events::emit_paused(&e, old, true);
    }

    /// Resume lock creation (admin only).
    pub fn unpause(e: Env, caller: Address) {
        require_admin(&e, &caller);
        let mut policy = read_policy(&e);
        let old = policy.paused;
        policy.paused = false;
        write_policy(&e, &policy);
        events::emit_unpaused(&e, old, false);
    }

    /// Sweep forfeited early-exit penalties for `asset` to `recipient`
    /// (admin only). Pays out exactly the forfeited counter and resets it,
    /// so unsettled principal can never be touched.
    pub fn sweep_forfeited(e: Env, caller: Address, asset: Address, recipient: Address) -> i128 {
        require_admin(&e, &caller);

        let amount = read_forfeited(&e, &asset);
        if amount == 0 {
            panic_with_error!(&e, Error::NothingToSweep);
        }
        // CEI: clear the counter before the transfer.
        e.storage()
            .persistent()
            .set(&DataKey::Forfeited(asset.clone()), &0_i128);

        let contract = e.current_contract_address();
        if TokenClient::new(&e, &asset)
            .try_transfer(&contract, &recipient, &amount)
            .is_err()
        {
            panic_with_error!(&e, Error::TransferFailed);
        }

        events::emit_forfeited_swept(&e, &asset, &recipient, amount);
        amount
    }
}
