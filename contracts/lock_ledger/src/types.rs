use soroban_sdk::{contracttype, Address};

// ─── Lock state ────────────────────────────────────────────────────────────

/// A single time-locked deposit owned by one address.
///
/// A lock is immutable between creation and settlement. Settlement flips
/// `settled` and records `yield_paid`; after that the record is read-only
/// history and is never removed from storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    /// Globally unique, strictly increasing id. Never reused.
    pub id: u64,
    /// The address whose compartment holds this lock.
    pub owner: Address,
    /// Token contract of the locked asset.
    pub asset: Address,
    /// Principal deposited; fixed at creation.
    pub amount: i128,
    /// Ledger timestamp at the moment the lock was created.
    pub created_at: u64,
    /// Pre-computed maturity: `created_at + duration`.
    pub unlock_at: u64,
    /// Lock period in seconds.
    pub duration: u64,
    /// True once a withdrawal (normal or emergency) has completed.
    pub settled: bool,
    /// Yield paid out at settlement. Zero until settled, and zero forever
    /// for emergency exits. Authoritative for post-settlement reward queries.
    pub yield_paid: i128,
}

// ─── Policy ────────────────────────────────────────────────────────────────

/// Global owner-mutable parameter set. Mutated exclusively through the
/// policy-update entry points; instance storage makes every committed update
/// visible to the next invocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// Annualized yield rate in basis points (0-10000 inclusive).
    pub reward_rate_bps: u32,
    /// Shortest accepted lock duration in seconds (> 0).
    pub min_duration: u64,
    /// Longest accepted lock duration in seconds (> min_duration).
    pub max_duration: u64,
    /// Early-exit penalty in basis points (strictly < 10000).
    pub early_exit_penalty_bps: u32,
    /// When true, new locks are rejected; settlements stay open.
    pub paused: bool,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Global `Policy` singleton.
    Policy,
    /// Next lock id to assign (u64, starts at 1).
    NextLockId,
    /// Arena of lock records keyed by global id.
    Lock(u64),
    /// Per-account compartment: ordered lock ids, creation order.
    AccountLocks(Address),
    /// Aggregate unsettled principal per (account, asset). Derived cache,
    /// maintained in lockstep with every create/settle.
    Balance(Address, Address),
    /// Number of unsettled locks per account. Derived cache.
    ActiveCount(Address),
    /// Forfeited early-exit penalties held in custody, per asset.
    Forfeited(Address),
}
