use anyhow::{Context, Result};
use async_trait::async_trait;
use nc_api_types::{
    AccountAddress, CallRequest, NetworkId, RpcRequest, RpcResponse, TransactionRequest, TxHash,
};
use nc_contract_client::Provider;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Fixed local development node (ganache default port).
pub const LOCAL_FALLBACK_URL: &str = "http://localhost:7545";

/// JSON-RPC over HTTP to a node that manages its own unlocked accounts.
///
/// Reads `NC_RPC_URL` from environment at construction time
/// (default: [`LOCAL_FALLBACK_URL`]).
pub struct HttpRpcProvider {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl Default for HttpRpcProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpRpcProvider {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("NC_RPC_URL").ok())
            .unwrap_or_else(|| LOCAL_FALLBACK_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "json-rpc request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&RpcRequest::new(id, method, params))
            .send()
            .await
            .with_context(|| format!("{method} transport"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("{method} HTTP {status}: {text}");
        }

        let body: RpcResponse<T> = response
            .json()
            .await
            .with_context(|| format!("{method} parse"))?;

        body.into_result(method).map_err(|err| {
            warn!("{}", err);
            anyhow::anyhow!(err)
        })
    }
}

#[async_trait]
impl Provider for HttpRpcProvider {
    fn name(&self) -> &str {
        "http"
    }

    // Node-managed accounts need no authorization prompt.
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>> {
        self.accounts().await
    }

    async fn accounts(&self) -> Result<Vec<AccountAddress>> {
        let accounts: Vec<String> = self.rpc("eth_accounts", serde_json::json!([])).await?;
        Ok(accounts.into_iter().map(AccountAddress).collect())
    }

    async fn network_id(&self) -> Result<NetworkId> {
        let id: String = self.rpc("net_version", serde_json::json!([])).await?;
        Ok(NetworkId(id))
    }

    async fn call(&self, req: CallRequest) -> Result<String> {
        self.rpc("eth_call", serde_json::json!([req, "latest"])).await
    }

    async fn send_transaction(&self, req: TransactionRequest) -> Result<TxHash> {
        let hash: String = self
            .rpc("eth_sendTransaction", serde_json::json!([req]))
            .await?;
        Ok(TxHash(hash))
    }
}
