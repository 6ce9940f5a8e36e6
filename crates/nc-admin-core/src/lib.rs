//! Admin control-panel logic for the NFT contract, independent of any UI.
//!
//! A [`Session`] pairs the bootstrapped [`Connection`] with the bound
//! contract. Handlers borrow it through a [`Dispatcher`], and every outcome
//! is written to a [`StatusPanel`].

mod bootstrap;
mod dispatch;
mod error;
pub mod input;
mod panel;
pub mod refresh;

use nc_api_types::AccountAddress;
use nc_contract_client::Provider;
use std::sync::Arc;

pub use bootstrap::{ProviderKind, authorize, bootstrap, select_provider};
pub use dispatch::{Action, Dispatcher};
pub use error::AdminError;
pub use panel::{Confirm, Slot, StatusPanel};

/// Fixed payment attached to `mint()`: 0.123 ether in wei.
pub const MINT_PRICE_WEI: u128 = 123_000_000_000_000_000;

/// The account-holding execution context chosen at startup.
pub struct Connection<P> {
    provider: Arc<P>,
    kind: ProviderKind,
    auth_failure: Option<String>,
}

impl<P: Provider> Connection<P> {
    pub fn new(provider: Arc<P>, kind: ProviderKind, auth_failure: Option<String>) -> Self {
        Self {
            provider,
            kind,
            auth_failure,
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn is_authorized(&self) -> bool {
        self.auth_failure.is_none()
    }

    /// Why authorization failed at startup, if it did.
    pub fn authorization_error(&self) -> Option<AdminError> {
        self.auth_failure
            .as_ref()
            .map(|reason| AdminError::Authorization(reason.clone()))
    }

    /// First account the provider currently exposes.
    pub async fn resolve_account(&self) -> Result<AccountAddress, AdminError> {
        let accounts = self
            .provider
            .accounts()
            .await
            .map_err(|err| AdminError::NoAccount(format!("{err:#}")))?;
        accounts
            .into_iter()
            .next()
            .ok_or_else(|| AdminError::NoAccount("provider exposes no accounts".to_owned()))
    }
}

/// Connection plus bound contract, owned by the entry point.
pub struct Session<P, C> {
    connection: Connection<P>,
    contract: C,
}

impl<P: Provider, C> Session<P, C> {
    pub fn new(connection: Connection<P>, contract: C) -> Self {
        Self {
            connection,
            contract,
        }
    }

    pub fn connection(&self) -> &Connection<P> {
        &self.connection
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }
}

#[cfg(test)]
pub(crate) mod testing;
