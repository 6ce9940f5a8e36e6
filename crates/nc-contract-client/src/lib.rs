pub mod abi;
mod handle;

use anyhow::Result;
use async_trait::async_trait;
use nc_api_types::{AccountAddress, CallRequest, NetworkId, TransactionRequest, TxHash};

pub use handle::{BindingError, ContractHandle, bind, bind_to_network, methods};

/// `Send + Sync` on native targets, nothing on wasm32 where JS handles are
/// single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSendSync for T {}

/// Account-holding transport to a node or wallet.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Provider: MaybeSendSync {
    fn name(&self) -> &str;
    /// Ask the wallet to authorize account access (may prompt the user).
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>>;
    async fn accounts(&self) -> Result<Vec<AccountAddress>>;
    async fn network_id(&self) -> Result<NetworkId>;
    /// `eth_call` at the latest block; returns the raw hex result.
    async fn call(&self, req: CallRequest) -> Result<String>;
    async fn send_transaction(&self, req: TransactionRequest) -> Result<TxHash>;
}

/// Sender and attached payment for a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOptions {
    pub from: AccountAddress,
    pub value_wei: Option<u128>,
}

impl TxOptions {
    pub fn from_account(from: AccountAddress) -> Self {
        Self {
            from,
            value_wei: None,
        }
    }

    pub fn with_value(mut self, value_wei: u128) -> Self {
        self.value_wei = Some(value_wei);
        self
    }
}

/// The deployed NFT contract's method surface.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait NftContract: MaybeSendSync {
    async fn minting_paused(&self) -> Result<bool>;
    async fn allow_public_mint(&self) -> Result<bool>;
    async fn base_uri(&self) -> Result<String>;
    async fn owner(&self) -> Result<String>;
    async fn is_minter(&self, address: &str) -> Result<bool>;

    async fn set_allow_public_mint(&self, allowed: bool, tx: TxOptions) -> Result<TxHash>;
    async fn set_minting_paused(&self, paused: bool, tx: TxOptions) -> Result<TxHash>;
    async fn mint(&self, tx: TxOptions) -> Result<TxHash>;
    async fn add_to_minters(&self, addresses: &[String], tx: TxOptions) -> Result<TxHash>;
    async fn set_base_uri(&self, uri: &str, tx: TxOptions) -> Result<TxHash>;
    async fn withdraw(&self, tx: TxOptions) -> Result<TxHash>;
    async fn transfer_ownership(&self, new_owner: &str, tx: TxOptions) -> Result<TxHash>;
}
