//! Campaign lifecycle gates.
//!
//! ```text
//! Open ──(now >= deadline)──► Expired
//!   └──────────close()──────────┴──► Closed
//! ```
//!
//! `Expired` is never written; it is derived from the ledger timestamp on
//! every call. `Closed` is terminal.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage_types::{Campaign, CampaignState, CrowdfundError, DataKey};

pub fn state_of(e: &Env, campaign: &Campaign) -> CampaignState {
    if campaign.closed {
        CampaignState::Closed
    } else if e.ledger().timestamp() >= campaign.deadline {
        CampaignState::Expired
    } else {
        CampaignState::Open
    }
}

pub fn require_organizer(e: &Env, campaign: &Campaign, caller: &Address) {
    if *caller != campaign.organizer {
        panic_with_error!(e, CrowdfundError::NotOrganizer);
    }
}

pub fn ensure_not_closed(e: &Env, campaign: &Campaign) {
    if campaign.closed {
        panic_with_error!(e, CrowdfundError::CampaignClosed);
    }
}

/// Closed takes precedence over expiry.
pub fn ensure_open(e: &Env, campaign: &Campaign) {
    match state_of(e, campaign) {
        CampaignState::Open => {}
        CampaignState::Expired => panic_with_error!(e, CrowdfundError::CampaignEnded),
        CampaignState::Closed => panic_with_error!(e, CrowdfundError::CampaignClosed),
    }
}

// Reentrancy guard. The flag is raised only around outbound calls that move
// funds, and every mutating entry point rejects a call while it is up.

pub fn guard_entry(e: &Env) {
    if is_locked(e) {
        panic_with_error!(e, CrowdfundError::Reentrancy);
    }
}

pub fn is_locked(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Locked).unwrap_or(false)
}

pub fn lock(e: &Env) {
    e.storage().instance().set(&DataKey::Locked, &true);
}

pub fn unlock(e: &Env) {
    e.storage().instance().set(&DataKey::Locked, &false);
}
