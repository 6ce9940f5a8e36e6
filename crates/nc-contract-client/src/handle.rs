use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use anyhow::{Context, Result};
use async_trait::async_trait;
use nc_api_types::{CallRequest, ContractDescriptor, NetworkId, TransactionRequest, TxHash};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::abi;
use crate::{NftContract, Provider, TxOptions};

/// Canonical signatures of the contract surface, taken from the `sol!`
/// declarations. The descriptor must declare every one of them.
pub mod methods {
    use crate::abi;
    use alloy_sol_types::SolCall;

    pub const MINTING_PAUSED: &str = abi::mintingPausedCall::SIGNATURE;
    pub const ALLOW_PUBLIC_MINT: &str = abi::allowPublicMintCall::SIGNATURE;
    pub const BASE_URI: &str = abi::BASE_URICall::SIGNATURE;
    pub const OWNER: &str = abi::ownerCall::SIGNATURE;
    pub const IS_MINTER: &str = abi::isMinterCall::SIGNATURE;
    pub const SET_ALLOW_PUBLIC_MINT: &str = abi::setAllowPublicMintCall::SIGNATURE;
    pub const SET_MINTING_PAUSED: &str = abi::setMintingPausedCall::SIGNATURE;
    pub const MINT: &str = abi::mintCall::SIGNATURE;
    pub const ADD_TO_MINTERS: &str = abi::addToMintersCall::SIGNATURE;
    pub const SET_BASE_URI: &str = abi::setBaseURICall::SIGNATURE;
    pub const WITHDRAW: &str = abi::withdrawCall::SIGNATURE;
    pub const TRANSFER_OWNERSHIP: &str = abi::transferOwnershipCall::SIGNATURE;

    pub const ALL: [&str; 12] = [
        MINTING_PAUSED,
        ALLOW_PUBLIC_MINT,
        BASE_URI,
        OWNER,
        IS_MINTER,
        SET_ALLOW_PUBLIC_MINT,
        SET_MINTING_PAUSED,
        MINT,
        ADD_TO_MINTERS,
        SET_BASE_URI,
        WITHDRAW,
        TRANSFER_OWNERSHIP,
    ];
}

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("could not determine active network: {0}")]
    Network(String),
    #[error("contract descriptor has an empty ABI")]
    EmptyAbi,
    #[error("contract descriptor does not declare {0}")]
    MissingMethod(&'static str),
    #[error("contract descriptor declares {0} as non-payable")]
    NotPayable(&'static str),
    #[error("contract not deployed on network {network} (known: {known})")]
    UnknownNetwork { network: String, known: String },
    #[error("deployment address '{0}' is not a valid address")]
    InvalidAddress(String),
}

/// Client-side binding of the contract's address to a provider.
pub struct ContractHandle<P> {
    provider: Arc<P>,
    address: Address,
    network: NetworkId,
}

impl<P> std::fmt::Debug for ContractHandle<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle")
            .field("address", &self.address)
            .field("network", &self.network)
            .finish()
    }
}

impl<P: Provider> ContractHandle<P> {
    pub fn new(provider: Arc<P>, address: Address, network: NetworkId) -> Self {
        Self {
            provider,
            address,
            network,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    fn to(&self) -> String {
        self.address.to_checksum(None)
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let data = abi::calldata(&call);
        let raw = self
            .provider
            .call(CallRequest {
                from: None,
                to: self.to(),
                data,
            })
            .await
            .with_context(|| format!("{} call", C::SIGNATURE))?;
        abi::decode_returns::<C>(&abi::decode_hex(&raw)?)
    }

    async fn write<C: SolCall>(&self, call: C, tx: TxOptions) -> Result<TxHash> {
        let data = abi::calldata(&call);
        debug!(method = C::SIGNATURE, from = %tx.from.0, "sending transaction");
        self.provider
            .send_transaction(TransactionRequest {
                from: tx.from.0,
                to: self.to(),
                data,
                value: tx.value_wei.map(|wei| format!("{wei:#x}")),
            })
            .await
            .with_context(|| format!("{} transaction", C::SIGNATURE))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<P: Provider> NftContract for ContractHandle<P> {
    async fn minting_paused(&self) -> Result<bool> {
        self.read(abi::mintingPausedCall {}).await
    }

    async fn allow_public_mint(&self) -> Result<bool> {
        self.read(abi::allowPublicMintCall {}).await
    }

    async fn base_uri(&self) -> Result<String> {
        self.read(abi::BASE_URICall {}).await
    }

    async fn owner(&self) -> Result<String> {
        let owner = self.read(abi::ownerCall {}).await?;
        Ok(owner.to_checksum(None))
    }

    async fn is_minter(&self, address: &str) -> Result<bool> {
        let account = abi::parse_address(address)?;
        self.read(abi::isMinterCall { account }).await
    }

    async fn set_allow_public_mint(&self, allowed: bool, tx: TxOptions) -> Result<TxHash> {
        self.write(abi::setAllowPublicMintCall { allowed }, tx).await
    }

    async fn set_minting_paused(&self, paused: bool, tx: TxOptions) -> Result<TxHash> {
        self.write(abi::setMintingPausedCall { paused }, tx).await
    }

    async fn mint(&self, tx: TxOptions) -> Result<TxHash> {
        self.write(abi::mintCall {}, tx).await
    }

    async fn add_to_minters(&self, addresses: &[String], tx: TxOptions) -> Result<TxHash> {
        let minters = addresses
            .iter()
            .map(|a| abi::parse_address(a))
            .collect::<Result<Vec<_>, _>>()?;
        self.write(abi::addToMintersCall { minters }, tx).await
    }

    async fn set_base_uri(&self, uri: &str, tx: TxOptions) -> Result<TxHash> {
        self.write(abi::setBaseURICall { uri: uri.to_owned() }, tx)
            .await
    }

    async fn withdraw(&self, tx: TxOptions) -> Result<TxHash> {
        self.write(abi::withdrawCall {}, tx).await
    }

    async fn transfer_ownership(&self, new_owner: &str, tx: TxOptions) -> Result<TxHash> {
        let new_owner = abi::parse_address(new_owner)?;
        self.write(abi::transferOwnershipCall { new_owner }, tx)
            .await
    }
}

/// Validate the descriptor and bind to the deployment on `network`.
pub fn bind_to_network<P: Provider>(
    provider: Arc<P>,
    descriptor: &ContractDescriptor,
    network: NetworkId,
) -> Result<ContractHandle<P>, BindingError> {
    if descriptor.abi.is_empty() {
        return Err(BindingError::EmptyAbi);
    }
    if let Some(missing) = methods::ALL
        .iter()
        .find(|signature| !descriptor.has_function(signature))
    {
        return Err(BindingError::MissingMethod(*missing));
    }
    if !descriptor
        .function(methods::MINT)
        .is_some_and(|entry| entry.is_payable())
    {
        return Err(BindingError::NotPayable(methods::MINT));
    }

    let deployment =
        descriptor
            .deployment(&network)
            .ok_or_else(|| BindingError::UnknownNetwork {
                network: network.0.clone(),
                known: descriptor.known_networks().join(", "),
            })?;

    let address = abi::parse_address(&deployment.address)
        .map_err(|_| BindingError::InvalidAddress(deployment.address.clone()))?;

    Ok(ContractHandle::new(provider, address, network))
}

/// Ask the provider for its network, then bind.
pub async fn bind<P: Provider>(
    provider: Arc<P>,
    descriptor: &ContractDescriptor,
) -> Result<ContractHandle<P>, BindingError> {
    let network = provider
        .network_id()
        .await
        .map_err(|err| BindingError::Network(format!("{err:#}")))?;
    debug!(network = %network.0, provider = provider.name(), "binding contract");
    bind_to_network(provider, descriptor, network)
}
