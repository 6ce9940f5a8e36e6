//! NFT admin console, browser frontend.
//!
//! Startup picks a provider, asks for account access, binds the contract
//! from its descriptor, renders the status panel and only then wires the
//! admin buttons.

#![cfg(target_arch = "wasm32")]

pub mod api;
pub mod dom;
pub mod events;
pub mod panel;
pub mod provider;

use nc_admin_core::{Session, Slot, StatusPanel, bootstrap, refresh};
use nc_api_types::ContractDescriptor;
use nc_contract_client::{ContractHandle, Provider, bind};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::events::AppContext;
use crate::panel::DomPanel;
use crate::provider::BrowserProvider;

pub type ConsoleSession = Session<BrowserProvider, ContractHandle<BrowserProvider>>;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let panel = DomPanel::new(els.clone());

    let connection = bootstrap(
        BrowserProvider::injected(),
        BrowserProvider::legacy(),
        BrowserProvider::local_node,
    )
    .await;
    gloo_console::log!(format!(
        "provider: {} ({})",
        connection.kind(),
        connection.provider().name()
    ));
    if let Some(err) = connection.authorization_error() {
        gloo_console::warn!(err.to_string());
        panel.show_error(Slot::ConnectedAccount, &err.to_string());
    }

    let url = api::descriptor_url();
    let descriptor = match load_descriptor(&url).await {
        Ok(descriptor) => descriptor,
        Err(err) => {
            gloo_console::error!(err.clone());
            panel.show_error(Slot::ActionResult, &err);
            return Ok(());
        }
    };

    let handle = match bind(connection.provider().clone(), &descriptor).await {
        Ok(handle) => handle,
        Err(err) => {
            // Leave the buttons unbound; nothing can be called.
            let message = format!("Contract binding failed: {err}");
            gloo_console::error!(message.clone());
            panel.show_error(Slot::ActionResult, &message);
            return Ok(());
        }
    };
    gloo_console::log!(format!(
        "bound {} at {} on network {}",
        descriptor.contract_name,
        handle.address(),
        handle.network().0
    ));

    let ctx = Rc::new(AppContext {
        els,
        session: Session::new(connection, handle),
        panel,
    });

    refresh::refresh(&ctx.session, &ctx.panel).await;
    events::bind_events(&ctx)
}

async fn load_descriptor(url: &str) -> Result<ContractDescriptor, String> {
    let text = api::fetch_text(url)
        .await
        .map_err(|e| format!("Could not load contract descriptor {url}: {e}"))?;
    ContractDescriptor::from_json(&text)
        .map_err(|e| format!("Contract descriptor {url} is invalid: {e}"))
}
