//! DOM element bindings.
//!
//! All fields are resolved once at startup; a missing id fails `bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

// ── Helpers ──

fn doc() -> Document {
    window().document().unwrap()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value()
}

/// Raw textarea content; line splitting happens in the admin core.
pub fn get_textarea_value(el: &HtmlTextAreaElement) -> String {
    el.value()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

// ── Elements struct ──

/// Every element the console reads from or writes to.
#[derive(Clone)]
pub struct Elements {
    // Status
    pub connected_account: Element,
    pub minting_paused: Element,
    pub public_minting_allowed: Element,
    pub base_uri: Element,
    pub owner: Element,
    pub can_mint_result: Element,
    pub action_result: Element,

    // Inputs
    pub check_minter_address: HtmlInputElement,
    pub add_minter_addresses: HtmlTextAreaElement,
    pub new_base_uri: HtmlInputElement,
    pub new_owner: HtmlInputElement,

    // Buttons
    pub check_minter_btn: HtmlElement,
    pub add_minter_btn: HtmlElement,
    pub mint_btn: HtmlElement,
    pub pause_minting_btn: HtmlElement,
    pub allow_minting_btn: HtmlElement,
    pub pause_public_minting_btn: HtmlElement,
    pub allow_public_minting_btn: HtmlElement,
    pub set_base_uri_btn: HtmlElement,
    pub withdraw_btn: HtmlElement,
    pub set_owner_btn: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_textarea {
    ($id:expr) => {
        by_id_typed::<HtmlTextAreaElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing textarea #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the module starts.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            connected_account: get_el!("connectedAccountDisplay"),
            minting_paused: get_el!("mintingPausedDisplay"),
            public_minting_allowed: get_el!("publicMintingAllowedDisplay"),
            base_uri: get_el!("baseUriDisplay"),
            owner: get_el!("ownerDisplay"),
            can_mint_result: get_el!("canMintResultDisplay"),
            action_result: get_el!("actionResultDisplay"),

            check_minter_address: get_input!("txtCheckMinterAddress"),
            add_minter_addresses: get_textarea!("txtAddMinterAddresses"),
            new_base_uri: get_input!("txtNewBaseUri"),
            new_owner: get_input!("txtNewOwner"),

            check_minter_btn: get_html!("btnCheckMinter"),
            add_minter_btn: get_html!("btnAddMinter"),
            mint_btn: get_html!("btnMint"),
            pause_minting_btn: get_html!("btnPauseMinting"),
            allow_minting_btn: get_html!("btnAllowMinting"),
            pause_public_minting_btn: get_html!("btnPausePublicMinting"),
            allow_public_minting_btn: get_html!("btnAllowPublicMinting"),
            set_base_uri_btn: get_html!("btnSetBaseUri"),
            withdraw_btn: get_html!("btnWithdraw"),
            set_owner_btn: get_html!("btnSetOwner"),
        })
    }
}
