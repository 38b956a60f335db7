#![no_std]


#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

mod config;
mod events;
mod ledger;
mod lifecycle;
mod provider;
mod settlement;
mod storage_types;
mod treasury;

pub use events::{CampaignClosedEvent, CampaignConfiguredEvent, ContributionReceivedEvent};
pub use provider::{CiphertextProvider, CiphertextProviderClient, DecryptionGrant};
pub use storage_types::{
    AggregateTotals, Campaign, CampaignDetails, CampaignState, Ciphertext, ContributionEntry,
    CrowdfundError,
};

use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Bytes, Env, String};
use storage_types::{
    DataKey, PersistentKey, INSTANCE_BUMP_THRESHOLD, PERSISTENT_BUMP_THRESHOLD, TTL_INSTANCE,
    TTL_PERSISTENT,
};

#[contract]
pub struct ConfidentialCrowdfundContract;

#[contractimpl]
impl ConfidentialCrowdfundContract {
    /// Set up the campaign. `token` is the native asset contract and
    /// `provider` the ciphertext arithmetic provider.
    pub fn initialize(
        e: Env,
        organizer: Address,
        token: Address,
        provider: Address,
        name: String,
        goal: i128,
        deadline: u64,
    ) {
        if config::has_campaign(&e) {
            panic_with_error!(&e, CrowdfundError::AlreadyInitialized);
        }
        organizer.require_auth();
        config::validate(&e, goal, deadline);

        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::Provider, &provider);
        e.storage().instance().set(&DataKey::Locked, &false);

        let campaign = Campaign {
            name,
            goal,
            deadline,
            organizer: organizer.clone(),
            closed: false,
        };
        config::write_campaign(&e, &campaign);
        ledger::init_totals(&e, &organizer);

        log!(&e, "campaign initialized", organizer, goal, deadline);
        events::emit_campaign_configured(
            &e,
            CampaignConfiguredEvent {
                name: campaign.name,
                goal,
                deadline,
            },
        );
    }

    /// Replace name, goal and deadline (organizer only, while open).
    pub fn configure(e: Env, caller: Address, name: String, goal: i128, deadline: u64) {
        caller.require_auth();
        config::configure(&e, &caller, name, goal, deadline);
    }

    /// Record a contribution of `amount` native units together with its
    /// ciphertext and input proof.
    pub fn contribute(
        e: Env,
        contributor: Address,
        amount: i128,
        encrypted_amount: Ciphertext,
        proof: Bytes,
    ) {
        contributor.require_auth();
        ledger::contribute(&e, &contributor, amount, &encrypted_amount, &proof);
    }

    /// Close the campaign and settle the held balance to the organizer.
    /// Returns the amount transferred.
    pub fn close(e: Env, caller: Address) -> i128 {
        caller.require_auth();
        settlement::close(&e, &caller)
    }

    /// View functions
    pub fn get_details(e: Env) -> CampaignDetails {
        config::details(&e)
    }

    /// Stake of `contributor`. Someone who never contributed gets the
    /// all-zero handle, meaning "never written": the provider holds no
    /// plaintext for it and will not decrypt it.
    pub fn get_contribution(e: Env, contributor: Address) -> ContributionEntry {
        ledger::entry_or_zero(&e, &contributor)
    }

    pub fn get_encrypted_total(e: Env) -> Ciphertext {
        ledger::read_totals(&e).encrypted_total
    }

    pub fn get_state(e: Env) -> CampaignState {
        let campaign = config::read_campaign(&e);
        lifecycle::state_of(&e, &campaign)
    }

    pub fn get_contributor_count(e: Env) -> u32 {
        ledger::contributor_count(&e)
    }

    pub fn get_held_balance(e: Env) -> i128 {
        treasury::held_balance(&e)
    }

    pub fn get_token(e: Env) -> Address {
        treasury::read_token(&e)
    }

    pub fn get_provider(e: Env) -> Address {
        provider::read_provider(&e)
    }
}

// Helper functions
pub(crate) fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, TTL_INSTANCE);
}

pub(crate) fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, TTL_PERSISTENT);
}
