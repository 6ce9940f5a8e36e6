//! Browser providers: the injected EIP-1193 wallet, the legacy
//! `web3.currentProvider`, or a plain HTTP node as last resort.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use nc_api_types::{
    AccountAddress, CallRequest, NetworkId, RpcRequest, RpcResponse, TransactionRequest, TxHash,
};
use nc_contract_client::Provider;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::{api, dom};

/// Local development node used when the page has no wallet.
pub const LOCAL_NODE_URL: &str = "http://localhost:7545";

enum Transport {
    /// `window.ethereum`
    Injected(JsValue),
    /// `window.web3.currentProvider`
    Legacy(JsValue),
    Http(String),
}

pub struct BrowserProvider {
    transport: Transport,
    next_id: Cell<u64>,
}

impl BrowserProvider {
    fn new(transport: Transport) -> Self {
        Self {
            transport,
            next_id: Cell::new(1),
        }
    }

    pub fn injected() -> Option<Self> {
        global("ethereum").map(|ethereum| Self::new(Transport::Injected(ethereum)))
    }

    pub fn legacy() -> Option<Self> {
        let web3 = global("web3")?;
        property(&web3, "currentProvider").map(|provider| Self::new(Transport::Legacy(provider)))
    }

    pub fn local_node() -> Self {
        Self::new(Transport::Http(LOCAL_NODE_URL.to_owned()))
    }

    fn request<'m>(&self, method: &'m str, params: Value) -> RpcRequest<'m> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        RpcRequest::new(id, method, params)
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let value = match &self.transport {
            Transport::Injected(ethereum) => eip1193_request(ethereum, method, params).await?,
            Transport::Legacy(provider) => {
                let payload = to_js(&self.request(method, params))?;
                let response: RpcResponse<Value> =
                    serde_wasm_bindgen::from_value(send_async(provider, &payload).await?)
                        .map_err(|e| anyhow!("{method}: malformed response: {e}"))?;
                response.into_result(method).map_err(|e| anyhow!(e))?
            }
            Transport::Http(endpoint) => {
                let body = serde_json::to_string(&self.request(method, params))?;
                let text = api::post_json(endpoint, &body)
                    .await
                    .map_err(|e| anyhow!("{method} transport: {e}"))?;
                let response: RpcResponse<Value> = serde_json::from_str(&text)
                    .with_context(|| format!("{method}: malformed response"))?;
                response.into_result(method).map_err(|e| anyhow!(e))?
            }
        };
        serde_json::from_value(value).with_context(|| format!("{method}: unexpected result"))
    }
}

#[async_trait(?Send)]
impl Provider for BrowserProvider {
    fn name(&self) -> &str {
        match self.transport {
            Transport::Injected(_) => "injected",
            Transport::Legacy(_) => "legacy",
            Transport::Http(_) => "http",
        }
    }

    async fn request_accounts(&self) -> Result<Vec<AccountAddress>> {
        self.rpc("eth_requestAccounts", json!([])).await
    }

    async fn accounts(&self) -> Result<Vec<AccountAddress>> {
        self.rpc("eth_accounts", json!([])).await
    }

    async fn network_id(&self) -> Result<NetworkId> {
        self.rpc("net_version", json!([])).await
    }

    async fn call(&self, req: CallRequest) -> Result<String> {
        self.rpc("eth_call", json!([req, "latest"])).await
    }

    async fn send_transaction(&self, req: TransactionRequest) -> Result<TxHash> {
        self.rpc("eth_sendTransaction", json!([req])).await
    }
}

// ── JS plumbing ──

fn global(name: &str) -> Option<JsValue> {
    property(&dom::window(), name)
}

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn method(target: &JsValue, name: &str) -> Result<Function> {
    property(target, name)
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| anyhow!("provider has no {name}() method"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| anyhow!("serializing request: {e}"))
}

/// Best-effort message from a thrown JS value or wallet error object.
fn js_error(value: JsValue) -> anyhow::Error {
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    anyhow!(message)
}

async fn eip1193_request(ethereum: &JsValue, rpc_method: &str, params: Value) -> Result<Value> {
    let args = to_js(&json!({ "method": rpc_method, "params": params }))?;
    let promise: Promise = method(ethereum, "request")?
        .call1(ethereum, &args)
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| anyhow!("{rpc_method}: request() did not return a promise"))?;
    let result = JsFuture::from(promise).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| anyhow!("{rpc_method}: {e}"))
}

/// Wrap the callback-style `sendAsync(payload, cb)` in a promise.
async fn send_async(provider: &JsValue, payload: &JsValue) -> Result<JsValue> {
    let send = method(provider, "sendAsync")?;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_reject = reject.clone();
        let callback = Closure::once_into_js(move |err: JsValue, response: JsValue| {
            if err.is_null() || err.is_undefined() {
                let _ = resolve.call1(&JsValue::NULL, &response);
            } else {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });
        if let Err(err) = send.call2(provider, payload, &callback) {
            let _ = on_reject.call1(&JsValue::NULL, &err);
        }
    });
    JsFuture::from(promise).await.map_err(js_error)
}
