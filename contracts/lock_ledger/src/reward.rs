//! Yield accrual and penalty math.
//!
//! Pure functions: no storage reads, no side effects. All intermediate
//! products use checked `i128` arithmetic; division always floors, so the
//! ledger never rounds a payout in the depositor's favor.

use soroban_sdk::{panic_with_error, Env};

use crate::errors::Error;

/// Accrual year: 365 days of 86400 seconds.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// 10000 bps = 100%.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Yield accrued by a lock at time `now`.
///
/// `elapsed` is clamped to `duration`: accrual stops at maturity even if
/// settlement is delayed, and saturates to zero if `now` precedes
/// `created_at`.
///
/// Formula: `floor(amount * rate_bps * elapsed / (10000 * SECONDS_PER_YEAR))`.
#[must_use]
pub fn accrued(
    e: &Env,
    amount: i128,
    rate_bps: u32,
    created_at: u64,
    duration: u64,
    now: u64,
) -> i128 {
    let elapsed = now.saturating_sub(created_at).min(duration);
    let numerator = amount
        .checked_mul(rate_bps as i128)
        .and_then(|v| v.checked_mul(elapsed as i128))
        .unwrap_or_else(|| panic_with_error!(e, Error::Overflow));
    numerator / (BPS_DENOMINATOR * SECONDS_PER_YEAR as i128)
}

/// Early-exit penalty: `floor(amount * penalty_bps / 10000)`.
#[must_use]
pub fn penalty(e: &Env, amount: i128, penalty_bps: u32) -> i128 {
    let numerator = amount
        .checked_mul(penalty_bps as i128)
        .unwrap_or_else(|| panic_with_error!(e, Error::Overflow));
    numerator / BPS_DENOMINATOR
}
