//! Shared test helpers for lock_ledger tests.

#![cfg(test)]

use crate::{LockLedger, LockLedgerClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

/// Default mint: large enough for all test scenarios.
pub const DEFAULT_MINT: i128 = 100_000_000_000_000;

/// Extra balance minted to the contract so it can fund yield payouts.
pub const YIELD_RESERVE: i128 = 1_000_000_000_000;

/// One day in seconds.
pub const ONE_DAY: u64 = 86_400;
/// One week in seconds.
pub const ONE_WEEK: u64 = 604_800;
/// One accrual year (365 days) in seconds.
pub const ONE_YEAR: u64 = 31_536_000;

/// Initial policy used by `setup`: 10% APY.
pub const RATE_BPS: u32 = 1_000;
pub const MIN_DURATION: u64 = 3_600;
pub const MAX_DURATION: u64 = 4 * ONE_YEAR;
/// 5% early-exit penalty.
pub const PENALTY_BPS: u32 = 500;

/// Full environment setup: deploys ledger + token, mints to `owner` and a
/// yield reserve to the contract, approves the contract.
/// Returns `(client, admin, owner, asset, contract_id)`.
pub fn setup(e: &Env) -> (LockLedgerClient<'_>, Address, Address, Address, Address) {
    e.mock_all_auths();

    let contract_id = e.register(LockLedger, ());
    let client = LockLedgerClient::new(e, &contract_id);
    let admin = Address::generate(e);
    let owner = Address::generate(e);

    let asset = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let asset_admin = StellarAssetClient::new(e, &asset);
    asset_admin.mint(&owner, &DEFAULT_MINT);
    asset_admin.mint(&contract_id, &YIELD_RESERVE);

    approve(e, &asset, &owner, &contract_id, DEFAULT_MINT);

    client.initialize(&admin, &RATE_BPS, &MIN_DURATION, &MAX_DURATION, &PENALTY_BPS);

    (client, admin, owner, asset, contract_id)
}

/// Mint `amount` of `asset` to `account` and approve the ledger to spend it.
pub fn fund_account(
    e: &Env,
    asset: &Address,
    contract_id: &Address,
    account: &Address,
    amount: i128,
) {
    StellarAssetClient::new(e, asset).mint(account, &amount);
    approve(e, asset, account, contract_id, amount);
}

fn approve(e: &Env, asset: &Address, from: &Address, spender: &Address, amount: i128) {
    let expiry_ledger = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, asset).approve(from, spender, &amount, &expiry_ledger);
}
