//! Seams between the admin logic and whatever renders it.

/// Display slots of the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ConnectedAccount,
    MintingPaused,
    PublicMintingAllowed,
    BaseUri,
    Owner,
    CanMintResult,
    ActionResult,
}

pub trait StatusPanel {
    fn show(&self, slot: Slot, text: &str);
    fn show_error(&self, slot: Slot, message: &str);
}

/// Interactive yes/no confirmation.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}
