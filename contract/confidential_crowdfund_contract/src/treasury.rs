//! Native currency held by the campaign.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::lifecycle;
use crate::storage_types::{CrowdfundError, DataKey};

pub fn read_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::NotInitialized))
}

fn token_client(e: &Env) -> token::Client<'_> {
    token::Client::new(e, &read_token(e))
}

pub fn held_balance(e: &Env) -> i128 {
    token_client(e).balance(&e.current_contract_address())
}

/// Pulls `amount` from `from` and checks the held balance grew by exactly
/// that much.
pub fn receive(e: &Env, from: &Address, amount: i128) {
    let token_client = token_client(e);
    let this = e.current_contract_address();

    let before = token_client.balance(&this);
    lifecycle::lock(e);
    token_client.transfer(from, &this, &amount);
    lifecycle::unlock(e);
    let after = token_client.balance(&this);

    if after.checked_sub(before) != Some(amount) {
        panic_with_error!(e, CrowdfundError::ValueMismatch);
    }
}

/// Sends `amount` out of the campaign. Any rejection by the token fails the
/// whole call.
pub fn pay_out(e: &Env, recipient: &Address, amount: i128) {
    if amount == 0 {
        return;
    }

    lifecycle::lock(e);
    let transferred = token_client(e).try_transfer(&e.current_contract_address(), recipient, &amount);
    lifecycle::unlock(e);

    if !matches!(transferred, Ok(Ok(()))) {
        panic_with_error!(e, CrowdfundError::TransferFailure);
    }
}
