//! Status Refresher: one batch of read-only queries, rendered slot by slot.

use futures::join;
use nc_api_types::{SlotValue, StatusSnapshot};
use nc_contract_client::{NftContract, Provider};
use tracing::{debug, warn};

use crate::{Session, Slot, StatusPanel};

pub const NOT_SET: &str = "-- Not Set --";
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn slot<T>(result: anyhow::Result<T>) -> SlotValue<T> {
    SlotValue::from(result.map_err(|err| format!("{err:#}")))
}

/// Run the four state queries and the account query concurrently. A failed
/// query only affects its own field.
pub async fn snapshot<P, C>(session: &Session<P, C>) -> StatusSnapshot
where
    P: Provider,
    C: NftContract,
{
    let contract = session.contract();
    let (account, paused, public_mint, base_uri, owner) = join!(
        session.connection().resolve_account(),
        contract.minting_paused(),
        contract.allow_public_mint(),
        contract.base_uri(),
        contract.owner(),
    );

    StatusSnapshot {
        connected_account: SlotValue::from(account.map(|a| a.0)),
        minting_paused: slot(paused),
        public_mint_allowed: slot(public_mint),
        base_uri: slot(base_uri),
        owner: slot(owner),
    }
}

pub fn render(snapshot: &StatusSnapshot, panel: &impl StatusPanel) {
    write_slot(panel, Slot::ConnectedAccount, &snapshot.connected_account, |a| a.clone());
    write_slot(panel, Slot::MintingPaused, &snapshot.minting_paused, |b| {
        yes_no(*b).to_owned()
    });
    write_slot(
        panel,
        Slot::PublicMintingAllowed,
        &snapshot.public_mint_allowed,
        |b| yes_no(*b).to_owned(),
    );
    write_slot(panel, Slot::BaseUri, &snapshot.base_uri, |uri| {
        if uri.is_empty() {
            NOT_SET.to_owned()
        } else {
            uri.clone()
        }
    });
    write_slot(panel, Slot::Owner, &snapshot.owner, |owner| {
        if owner.is_empty() || owner.eq_ignore_ascii_case(ZERO_ADDRESS) {
            NOT_SET.to_owned()
        } else {
            owner.clone()
        }
    });
}

fn write_slot<T>(
    panel: &impl StatusPanel,
    slot: Slot,
    value: &SlotValue<T>,
    display: impl Fn(&T) -> String,
) {
    match value {
        SlotValue::Value(v) => panel.show(slot, &display(v)),
        SlotValue::Error(message) => {
            warn!(?slot, "status query failed: {}", message);
            panel.show_error(slot, message);
        }
    }
}

pub async fn refresh<P, C>(session: &Session<P, C>, panel: &impl StatusPanel) -> StatusSnapshot
where
    P: Provider,
    C: NftContract,
{
    let snapshot = snapshot(session).await;
    debug!(?snapshot, "status refreshed");
    render(&snapshot, panel);
    snapshot
}
