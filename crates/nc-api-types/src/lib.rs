use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NetworkId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxHash(pub String);

// ── Contract descriptor (truffle artifact) ───────────────────────────

/// Static contract descriptor: method interface plus per-network deployments.
///
/// Matches the artifact layout emitted by truffle; fields this client does
/// not use (bytecode, source maps, compiler metadata) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    #[serde(default)]
    pub contract_name: String,
    pub abi: Vec<AbiEntry>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkDeployment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(default)]
    pub state_mutability: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeployment {
    pub address: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl ContractDescriptor {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn deployment(&self, network: &NetworkId) -> Option<&NetworkDeployment> {
        self.networks.get(&network.0)
    }

    /// Network ids the contract is deployed on, sorted for stable messages.
    pub fn known_networks(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.networks.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The function entry with this canonical signature,
    /// e.g. `transferOwnership(address)`.
    pub fn function(&self, signature: &str) -> Option<&AbiEntry> {
        self.abi
            .iter()
            .filter(|entry| entry.kind == "function")
            .find(|entry| entry.signature().as_deref() == Some(signature))
    }

    pub fn has_function(&self, signature: &str) -> bool {
        self.function(signature).is_some()
    }
}

impl AbiEntry {
    pub fn signature(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let inputs: Vec<&str> = self.inputs.iter().map(|p| p.kind.as_str()).collect();
        Some(format!("{}({})", name, inputs.join(",")))
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability.as_deref() == Some("payable")
    }
}

// ── JSON-RPC wire types ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.message)
    }
}

impl<T> RpcResponse<T> {
    /// Collapse the envelope into the result or a readable error.
    pub fn into_result(self, method: &str) -> Result<T, String> {
        if let Some(err) = self.error {
            return Err(format!("{method}: {err}"));
        }
        self.result
            .ok_or_else(|| format!("{method}: response carried neither result nor error"))
    }
}

/// `eth_call` parameters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    pub data: String,
}

/// `eth_sendTransaction` parameters. `value` is a hex quantity in wei.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

// ── Status snapshot ──────────────────────────────────────────────────

/// One display value: either what the contract returned or why it could not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotValue<T> {
    Value(T),
    Error(String),
}

impl<T> SlotValue<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SlotValue::Value(v) => Some(v),
            SlotValue::Error(_) => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for SlotValue<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => SlotValue::Value(v),
            Err(err) => SlotValue::Error(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub connected_account: SlotValue<String>,
    pub minting_paused: SlotValue<bool>,
    pub public_mint_allowed: SlotValue<bool>,
    pub base_uri: SlotValue<String>,
    pub owner: SlotValue<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "contractName": "ZTestNftv1",
        "abi": [
            {"type": "constructor", "inputs": []},
            {"type": "function", "name": "owner", "inputs": [], "outputs": [{"name": "", "type": "address"}], "stateMutability": "view"},
            {"type": "function", "name": "addToMinters", "inputs": [{"name": "minters", "type": "address[]"}], "outputs": [], "stateMutability": "nonpayable"},
            {"type": "function", "name": "mint", "inputs": [], "outputs": [], "stateMutability": "payable"},
            {"type": "event", "name": "OwnershipTransferred", "inputs": [{"name": "previousOwner", "type": "address"}]}
        ],
        "networks": {
            "5777": {"address": "0x5FbDB2315678afecb367f032d93F642f64180aa3", "transactionHash": "0xabc"},
            "1337": {"address": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"}
        },
        "bytecode": "0x6080"
    }"#;

    #[test]
    fn descriptor_parses_truffle_artifact() {
        let descriptor = ContractDescriptor::from_json(ARTIFACT).expect("artifact should parse");

        assert_eq!(descriptor.contract_name, "ZTestNftv1");
        assert_eq!(descriptor.abi.len(), 5);
        assert_eq!(descriptor.known_networks(), vec!["1337".to_owned(), "5777".to_owned()]);

        let deployment = descriptor
            .deployment(&NetworkId("5777".to_owned()))
            .expect("5777 deployment");
        assert_eq!(deployment.address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert!(descriptor.deployment(&NetworkId("1".to_owned())).is_none());
    }

    #[test]
    fn has_function_matches_canonical_signatures_only() {
        let descriptor = ContractDescriptor::from_json(ARTIFACT).unwrap();

        assert!(descriptor.has_function("owner()"));
        assert!(descriptor.has_function("addToMinters(address[])"));
        assert!(!descriptor.has_function("addToMinters(address)"));
        // events are not callable
        assert!(!descriptor.has_function("OwnershipTransferred(address)"));

        assert!(descriptor.function("mint()").is_some_and(AbiEntry::is_payable));
        assert!(!descriptor.function("owner()").is_some_and(AbiEntry::is_payable));
    }

    #[test]
    fn rpc_response_prefers_error_over_result() {
        let ok: RpcResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).unwrap();
        assert_eq!(ok.into_result("eth_call").unwrap(), "0x1");

        let failed: RpcResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap();
        let err = failed.into_result("eth_sendTransaction").unwrap_err();
        assert_eq!(err, "eth_sendTransaction: rpc error -32000: execution reverted");
    }

    #[test]
    fn transaction_request_omits_absent_value() {
        let tx = TransactionRequest {
            from: "0x01".to_owned(),
            to: "0x02".to_owned(),
            data: "0x3ccfd60b".to_owned(),
            value: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("value").is_none());
    }

    #[test]
    fn slot_value_serializes_tagged() {
        let snapshot = StatusSnapshot {
            connected_account: SlotValue::Error("no accounts".to_owned()),
            minting_paused: SlotValue::Value(true),
            public_mint_allowed: SlotValue::Value(false),
            base_uri: SlotValue::Value("ipfs://cid/".to_owned()),
            owner: SlotValue::Value("0xabc".to_owned()),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["minting_paused"]["value"], true);
        assert_eq!(json["connected_account"]["error"], "no accounts");
    }
}
