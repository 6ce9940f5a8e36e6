//! DOM renderings of the admin core's panel and confirmation seams.

use nc_admin_core::{Confirm, Slot, StatusPanel};
use web_sys::Element;

use crate::dom::{self, Elements};

pub struct DomPanel {
    els: Elements,
}

impl DomPanel {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }

    fn element(&self, slot: Slot) -> &Element {
        match slot {
            Slot::ConnectedAccount => &self.els.connected_account,
            Slot::MintingPaused => &self.els.minting_paused,
            Slot::PublicMintingAllowed => &self.els.public_minting_allowed,
            Slot::BaseUri => &self.els.base_uri,
            Slot::Owner => &self.els.owner,
            Slot::CanMintResult => &self.els.can_mint_result,
            Slot::ActionResult => &self.els.action_result,
        }
    }
}

impl StatusPanel for DomPanel {
    fn show(&self, slot: Slot, text: &str) {
        let el = self.element(slot);
        dom::remove_class(el, "error");
        dom::set_text(el, text);
    }

    fn show_error(&self, slot: Slot, message: &str) {
        let el = self.element(slot);
        dom::add_class(el, "error");
        dom::set_text(el, message);
    }
}

/// `window.confirm`; a blocked dialog counts as "no".
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        dom::window().confirm_with_message(message).unwrap_or(false)
    }
}
