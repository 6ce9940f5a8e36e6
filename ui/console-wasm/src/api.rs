//! `fetch` wrappers for the descriptor download and plain HTTP JSON-RPC.

use crate::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// Artifact location when the page does not provide `#descriptorUrl`.
pub const DEFAULT_DESCRIPTOR_URL: &str = "NftConsole.json";

/// Priority: user-supplied `#descriptorUrl` input, then the file next to the page.
pub fn descriptor_url() -> String {
    if let Some(input) = dom::by_id_typed::<web_sys::HtmlInputElement>("descriptorUrl") {
        let v = input.value().trim().to_string();
        if !v.is_empty() {
            return v;
        }
    }
    DEFAULT_DESCRIPTOR_URL.to_string()
}

/// Fetch a URL and return the body as a plain string.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    send(&request).await
}

/// POST a JSON body and return the response text.
pub async fn post_json(url: &str, body: &str) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{:?}", e))?;
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    send(&request).await
}

async fn send(request: &Request) -> Result<String, String> {
    let resp_value = JsFuture::from(dom::window().fetch_with_request(request))
        .await
        .map_err(|e| format!("fetch error: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "response is not a Response".to_string())?;

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;
    let text = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(format!("{} {}: {}", resp.status(), resp.status_text(), text));
    }
    Ok(text)
}
