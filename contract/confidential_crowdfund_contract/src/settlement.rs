use soroban_sdk::{log, Address, Env};

use crate::config;
use crate::events;
use crate::ledger;
use crate::lifecycle;
use crate::treasury;

/// Closes the campaign and pays the whole held balance to the organizer.
///
/// The closed flag and the payout commit together: if the transfer is
/// rejected the call fails and the host discards the flag write.
pub fn close(e: &Env, caller: &Address) -> i128 {
    lifecycle::guard_entry(e);
    let mut campaign = config::read_campaign(e);
    lifecycle::require_organizer(e, &campaign, caller);
    lifecycle::ensure_not_closed(e, &campaign);

    campaign.closed = true;
    config::write_campaign(e, &campaign);

    let amount_settled = treasury::held_balance(e);
    treasury::pay_out(e, &campaign.organizer, amount_settled);

    let clear_total = ledger::read_totals(e).clear_total;
    log!(e, "campaign closed", amount_settled, clear_total);
    events::emit_campaign_closed(
        e,
        events::CampaignClosedEvent {
            organizer: campaign.organizer,
            amount_settled,
            clear_total,
        },
    );

    amount_settled
}
