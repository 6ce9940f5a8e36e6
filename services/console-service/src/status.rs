use axum::{Json, extract::State};
use nc_admin_core::refresh;
use nc_api_types::StatusSnapshot;
use std::sync::Arc;

use crate::{AppState, ApiResult, unavailable};

/// The contract artifact the browser console binds against.
pub(crate) async fn descriptor(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.descriptor.clone())
}

/// Read-only status snapshot through the service's own node connection.
pub(crate) async fn status(State(state): State<Arc<AppState>>) -> ApiResult<StatusSnapshot> {
    let session = state
        .session
        .as_ref()
        .map_err(|reason| unavailable(&format!("contract not bound: {reason}")))?;

    Ok(Json(refresh::snapshot(session).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeSession, app, load_descriptor};
    use alloy_sol_types::SolValue;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use nc_admin_core::{ProviderKind, Session, authorize};
    use nc_contract_client::{abi, bind};
    use nc_rpc_http::HttpRpcProvider;
    use serde_json::{Value, json};
    use std::io::Write;
    use std::path::Path;
    use tower::ServiceExt;

    const SENDER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
    const OWNER: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

    fn fixture_path() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../contracts/NftConsole.json"))
    }

    fn reply<T: SolValue>(value: T) -> Value {
        json!(format!("0x{}", hex::encode(value.abi_encode())))
    }

    /// JSON-RPC node serving the contract's view functions.
    async fn fake_node(Json(body): Json<Value>) -> Json<Value> {
        let result = match body["method"].as_str().unwrap_or_default() {
            "eth_accounts" => json!([SENDER]),
            "net_version" => json!("5777"),
            "eth_call" => {
                let data = body["params"][0]["data"].as_str().unwrap_or_default();
                if data == abi::calldata(&abi::mintingPausedCall {}) {
                    reply(false)
                } else if data == abi::calldata(&abi::allowPublicMintCall {}) {
                    reply(true)
                } else if data == abi::calldata(&abi::BASE_URICall {}) {
                    reply("ipfs://collection/".to_owned())
                } else if data == abi::calldata(&abi::ownerCall {}) {
                    reply(abi::parse_address(OWNER).unwrap())
                } else {
                    return Json(json!({
                        "jsonrpc": "2.0", "id": body["id"],
                        "error": { "code": -32000, "message": "execution reverted" }
                    }));
                }
            }
            _ => Value::Null,
        };
        Json(json!({ "jsonrpc": "2.0", "id": body["id"], "result": result }))
    }

    async fn spawn_node() -> anyhow::Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let node = Router::new().route("/", post(fake_node));
        tokio::spawn(async move {
            let _ = axum::serve(listener, node).await;
        });
        Ok(format!("http://{addr}"))
    }

    async fn bound_session(endpoint: String) -> anyhow::Result<NodeSession> {
        let (_, descriptor) = load_descriptor(fixture_path())?;
        let provider = Arc::new(HttpRpcProvider::new(Some(endpoint)));
        let connection = authorize(provider, ProviderKind::Fallback).await;
        let handle = bind(connection.provider().clone(), &descriptor).await?;
        Ok(Session::new(connection, handle))
    }

    async fn get(state: Arc<AppState>, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }

    fn unbound_state() -> anyhow::Result<Arc<AppState>> {
        let (raw, _) = load_descriptor(fixture_path())?;
        Ok(Arc::new(AppState {
            descriptor: raw,
            session: Err("contract not deployed on network 1 (known: 5777)".to_owned()),
        }))
    }

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let (status, body) = get(unbound_state()?, "/health").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "console-service");
        assert_eq!(body["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn descriptor_is_served_verbatim() -> anyhow::Result<()> {
        let (status, body) = get(unbound_state()?, "/descriptor").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contractName"], "ZTestNftv1");
        assert_eq!(
            body["networks"]["5777"]["address"],
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        Ok(())
    }

    #[tokio::test]
    async fn status_without_binding_is_unavailable() -> anyhow::Result<()> {
        let (status, body) = get(unbound_state()?, "/status").await?;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|e| e.contains("network 1"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn status_reads_contract_state_through_the_node() -> anyhow::Result<()> {
        let session = bound_session(spawn_node().await?).await?;
        let (raw, _) = load_descriptor(fixture_path())?;
        let state = Arc::new(AppState {
            descriptor: raw,
            session: Ok(session),
        });

        let (status, body) = get(state, "/status").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected_account"]["value"], SENDER);
        assert_eq!(body["minting_paused"]["value"], false);
        assert_eq!(body["public_mint_allowed"]["value"], true);
        assert_eq!(body["base_uri"]["value"], "ipfs://collection/");
        assert_eq!(body["owner"]["value"], OWNER);
        Ok(())
    }

    #[test]
    fn load_descriptor_rejects_artifacts_without_abi() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"contractName": "Broken", "networks": {{}}}}"#)?;

        let err = load_descriptor(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no usable ABI"));

        assert!(load_descriptor(Path::new("/nonexistent/NftConsole.json")).is_err());
        Ok(())
    }
}
