//! Dual bookkeeping of contributions.
//!
//! Every stake is kept twice: as a provider ciphertext and as a clear `u64`
//! mirror used for display. Both are written in the same invocation, so the
//! host's all-or-nothing commit never exposes one without the other.
//!
//! The ledger cannot see inside a ciphertext. The mirror matches the
//! decryption only because the provider's input proof is trusted to bind the
//! submitted ciphertext to the declared `amount`; a provider that accepts a
//! proof for a different value breaks that match.
//!
//! The mirrors have the width of the encrypted integer. A contribution that
//! would overflow either of them is rejected, since the ciphertext would
//! silently wrap and drift from its mirror.

use soroban_sdk::{log, panic_with_error, Address, Bytes, Env};

use crate::config;
use crate::events;
use crate::lifecycle;
use crate::provider;
use crate::storage_types::{
    unset_ciphertext, AggregateTotals, Ciphertext, ContributionEntry, CrowdfundError,
    DataKey, PersistentKey, MAX_ENCRYPTED_AMOUNT,
};
use crate::treasury;
use crate::{extend_instance, extend_persistent};

pub fn read_totals(e: &Env) -> AggregateTotals {
    e.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::NotInitialized))
}

fn write_totals(e: &Env, totals: &AggregateTotals) {
    e.storage().instance().set(&DataKey::Totals, totals);
    extend_instance(e);
}

/// Seeds the aggregate with an encrypted zero the organizer can decrypt.
pub fn init_totals(e: &Env, organizer: &Address) {
    let encrypted_total = provider::encrypted_zero(e);
    provider::allow(e, &encrypted_total, organizer);
    write_totals(
        e,
        &AggregateTotals {
            encrypted_total,
            clear_total: 0,
        },
    );
    e.storage().instance().set(&DataKey::ContributorCount, &0u32);
}

pub fn read_entry(e: &Env, contributor: &Address) -> Option<ContributionEntry> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Contribution(contributor.clone()))
}

/// Entry for `contributor`, or the implicit zero entry.
pub fn entry_or_zero(e: &Env, contributor: &Address) -> ContributionEntry {
    read_entry(e, contributor).unwrap_or_else(|| ContributionEntry {
        encrypted_amount: unset_ciphertext(e),
        clear_amount: 0,
        last_contribution_at: 0,
    })
}

fn write_entry(e: &Env, contributor: &Address, entry: &ContributionEntry) {
    let key = PersistentKey::Contribution(contributor.clone());
    e.storage().persistent().set(&key, entry);
    extend_persistent(e, &key);
}

pub fn contributor_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

/// Narrows a token amount to the encrypted integer width.
pub fn encrypted_width_amount(e: &Env, amount: i128) -> u64 {
    if amount <= 0 {
        panic_with_error!(e, CrowdfundError::InvalidAmount);
    }
    if amount > MAX_ENCRYPTED_AMOUNT {
        panic_with_error!(e, CrowdfundError::AmountOverflow);
    }
    amount as u64
}

/// Adds one contribution to the contributor's stake and to the aggregate.
pub fn contribute(
    e: &Env,
    contributor: &Address,
    amount: i128,
    encrypted_amount: &Ciphertext,
    proof: &Bytes,
) {
    lifecycle::guard_entry(e);
    let campaign = config::read_campaign(e);
    lifecycle::ensure_open(e, &campaign);

    let clear_delta = encrypted_width_amount(e, amount);

    let existing = read_entry(e, contributor);
    let totals = read_totals(e);

    let clear_amount = existing
        .as_ref()
        .map_or(0, |entry| entry.clear_amount)
        .checked_add(clear_delta)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::AmountOverflow));
    let clear_total = totals
        .clear_total
        .checked_add(clear_delta)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::AmountOverflow));

    provider::accept_input(e, encrypted_amount, proof, contributor);
    treasury::receive(e, contributor, amount);

    let base = match &existing {
        Some(entry) => entry.encrypted_amount.clone(),
        None => provider::encrypted_zero(e),
    };
    let now = e.ledger().timestamp();
    let entry = ContributionEntry {
        encrypted_amount: provider::add(e, &base, encrypted_amount),
        clear_amount,
        last_contribution_at: now,
    };
    let totals = AggregateTotals {
        encrypted_total: provider::add(e, &totals.encrypted_total, encrypted_amount),
        clear_total,
    };

    write_entry(e, contributor, &entry);
    write_totals(e, &totals);
    if existing.is_none() {
        e.storage()
            .instance()
            .set(&DataKey::ContributorCount, &(contributor_count(e) + 1));
    }

    // Each contributor reads their own stake; only the organizer reads the total.
    provider::allow(e, &entry.encrypted_amount, contributor);
    provider::allow(e, &totals.encrypted_total, &campaign.organizer);

    log!(e, "contribution recorded", contributor.clone(), amount, clear_total);
    events::emit_contribution_received(
        e,
        events::ContributionReceivedEvent {
            contributor: contributor.clone(),
            amount,
            timestamp: now,
        },
    );
}
