use soroban_sdk::{log, panic_with_error, Address, Env, String};

use crate::events;
use crate::ledger;
use crate::lifecycle;
use crate::storage_types::{Campaign, CampaignDetails, CrowdfundError, DataKey};
use crate::extend_instance;

pub fn has_campaign(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Campaign)
}

pub fn read_campaign(e: &Env) -> Campaign {
    e.storage()
        .instance()
        .get(&DataKey::Campaign)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::NotInitialized))
}

pub fn write_campaign(e: &Env, campaign: &Campaign) {
    e.storage().instance().set(&DataKey::Campaign, campaign);
    extend_instance(e);
}

/// Goal must be positive and the deadline strictly in the future.
pub fn validate(e: &Env, goal: i128, deadline: u64) {
    if goal <= 0 || deadline <= e.ledger().timestamp() {
        panic_with_error!(e, CrowdfundError::InvalidConfiguration);
    }
}

/// Replaces name, goal and deadline together.
pub fn configure(e: &Env, caller: &Address, name: String, goal: i128, deadline: u64) {
    lifecycle::guard_entry(e);
    let mut campaign = read_campaign(e);
    lifecycle::require_organizer(e, &campaign, caller);
    lifecycle::ensure_open(e, &campaign);
    validate(e, goal, deadline);

    campaign.name = name;
    campaign.goal = goal;
    campaign.deadline = deadline;
    write_campaign(e, &campaign);

    log!(e, "campaign configured", goal, deadline);
    events::emit_campaign_configured(
        e,
        events::CampaignConfiguredEvent {
            name: campaign.name,
            goal,
            deadline,
        },
    );
}

pub fn details(e: &Env) -> CampaignDetails {
    let campaign = read_campaign(e);
    let totals = ledger::read_totals(e);

    CampaignDetails {
        name: campaign.name,
        goal: campaign.goal,
        deadline: campaign.deadline,
        closed: campaign.closed,
        clear_total: totals.clear_total,
        organizer: campaign.organizer,
    }
}
