use soroban_sdk::{contracttype, Address, Env, String, Symbol};

// Events carry public fields only. Ciphertext handles are never published.

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignConfiguredEvent {
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionReceivedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignClosedEvent {
    pub organizer: Address,
    pub amount_settled: i128,
    pub clear_total: u64,
}

pub fn emit_campaign_configured(env: &Env, event: CampaignConfiguredEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_configured"),),
        event,
    );
}

pub fn emit_contribution_received(env: &Env, event: ContributionReceivedEvent) {
    env.events().publish(
        (Symbol::new(env, "contribution_received"), event.contributor.clone()),
        event,
    );
}

pub fn emit_campaign_closed(env: &Env, event: CampaignClosedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_closed"),),
        event,
    );
}
