//! Button wiring. One handler per admin action; each reads its input,
//! hands it to the dispatcher and lets the panel show the outcome.

use nc_admin_core::{AdminError, Dispatcher};
use nc_contract_client::ContractHandle;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Elements};
use crate::panel::{DomPanel, WindowConfirm};
use crate::provider::BrowserProvider;
use crate::ConsoleSession;

/// Everything a click handler needs, shared by all listeners.
pub struct AppContext {
    pub els: Elements,
    pub session: ConsoleSession,
    pub panel: DomPanel,
}

type ConsoleDispatcher<'a> =
    Dispatcher<'a, BrowserProvider, ContractHandle<BrowserProvider>, DomPanel>;

impl AppContext {
    fn dispatcher(&self) -> ConsoleDispatcher<'_> {
        Dispatcher::new(&self.session, &self.panel)
    }
}

/// Attach an async click handler taking `&AppContext`.
macro_rules! on_click_async {
    ($el:expr, $ctx:expr, $handler:expr) => {{
        let ctx = Rc::clone(&$ctx);
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let ctx2 = Rc::clone(&ctx);
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&ctx2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind every admin button. Call once, after the contract is bound.
pub fn bind_events(ctx: &Rc<AppContext>) -> Result<(), JsValue> {
    let els = &ctx.els;

    on_click_async!(els.check_minter_btn, ctx, on_check_minter);
    on_click_async!(els.add_minter_btn, ctx, on_add_minters);
    on_click_async!(els.mint_btn, ctx, on_mint);

    on_click_async!(els.pause_minting_btn, ctx, on_pause_minting);
    on_click_async!(els.allow_minting_btn, ctx, on_allow_minting);
    on_click_async!(els.pause_public_minting_btn, ctx, on_pause_public_minting);
    on_click_async!(els.allow_public_minting_btn, ctx, on_allow_public_minting);

    on_click_async!(els.set_base_uri_btn, ctx, on_set_base_uri);
    on_click_async!(els.withdraw_btn, ctx, on_withdraw);
    on_click_async!(els.set_owner_btn, ctx, on_set_owner);

    Ok(())
}

/// The panel already shows the outcome; failures also go to the console.
fn log_outcome<T: Display>(action: &str, result: Result<T, AdminError>) {
    match result {
        Ok(value) => gloo_console::log!(format!("{action}: {value}")),
        Err(AdminError::Cancelled) => {}
        Err(err) => gloo_console::warn!(format!("{action} failed: {err}")),
    }
}

async fn on_check_minter(ctx: &AppContext) {
    let address = dom::get_input_value(&ctx.els.check_minter_address);
    log_outcome("isMinter", ctx.dispatcher().check_minter(&address).await);
}

async fn on_add_minters(ctx: &AppContext) {
    let list = dom::get_textarea_value(&ctx.els.add_minter_addresses);
    let result = ctx.dispatcher().add_minters(&list).await;
    log_outcome("addToMinters", result.map(|hash| hash.0));
}

async fn on_mint(ctx: &AppContext) {
    let result = ctx.dispatcher().mint().await;
    log_outcome("mint", result.map(|hash| hash.0));
}

async fn on_pause_minting(ctx: &AppContext) {
    let result = ctx.dispatcher().set_minting_paused(true).await;
    log_outcome("setMintingPaused(true)", result.map(|hash| hash.0));
}

async fn on_allow_minting(ctx: &AppContext) {
    let result = ctx.dispatcher().set_minting_paused(false).await;
    log_outcome("setMintingPaused(false)", result.map(|hash| hash.0));
}

async fn on_pause_public_minting(ctx: &AppContext) {
    let result = ctx.dispatcher().set_allow_public_mint(false).await;
    log_outcome("setAllowPublicMint(false)", result.map(|hash| hash.0));
}

async fn on_allow_public_minting(ctx: &AppContext) {
    let result = ctx.dispatcher().set_allow_public_mint(true).await;
    log_outcome("setAllowPublicMint(true)", result.map(|hash| hash.0));
}

async fn on_set_base_uri(ctx: &AppContext) {
    let uri = dom::get_input_value(&ctx.els.new_base_uri);
    let result = ctx.dispatcher().set_base_uri(&uri).await;
    log_outcome("setBaseURI", result.map(|hash| hash.0));
}

async fn on_withdraw(ctx: &AppContext) {
    let result = ctx.dispatcher().withdraw().await;
    log_outcome("withdraw", result.map(|hash| hash.0));
}

async fn on_set_owner(ctx: &AppContext) {
    let new_owner = dom::get_input_value(&ctx.els.new_owner);
    let result = ctx
        .dispatcher()
        .transfer_ownership(&new_owner, &WindowConfirm)
        .await;
    log_outcome("transferOwnership", result.map(|hash| hash.0));
}
