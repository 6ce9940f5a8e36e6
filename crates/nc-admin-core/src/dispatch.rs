//! UI Command Dispatcher: one method per admin action.
//!
//! Each mutating action resolves the sender, normalizes its input, issues
//! exactly one contract call and reports the outcome to the panel. Actions
//! that change displayed state refresh the panel afterwards.

use nc_api_types::TxHash;
use nc_contract_client::{NftContract, Provider, TxOptions};
use std::fmt;
use std::future::Future;
use tracing::{debug, info, warn};

use crate::refresh::{self, yes_no};
use crate::{AdminError, Confirm, MINT_PRICE_WEI, Session, Slot, StatusPanel, input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddMinters,
    Mint,
    SetMintingPaused(bool),
    SetAllowPublicMint(bool),
    SetBaseUri,
    Withdraw,
    TransferOwnership,
}

impl Action {
    /// Whether the displayed status changes and must be re-read.
    pub fn refreshes(self) -> bool {
        !matches!(self, Action::AddMinters | Action::Withdraw)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::AddMinters => "Add minters",
            Action::Mint => "Mint",
            Action::SetMintingPaused(true) => "Pause minting",
            Action::SetMintingPaused(false) => "Allow minting",
            Action::SetAllowPublicMint(true) => "Allow public minting",
            Action::SetAllowPublicMint(false) => "Pause public minting",
            Action::SetBaseUri => "Set base URI",
            Action::Withdraw => "Withdraw",
            Action::TransferOwnership => "Transfer ownership",
        };
        f.write_str(label)
    }
}

pub struct Dispatcher<'a, P, C, S> {
    session: &'a Session<P, C>,
    panel: &'a S,
}

impl<'a, P, C, S> Dispatcher<'a, P, C, S>
where
    P: Provider,
    C: NftContract,
    S: StatusPanel,
{
    pub fn new(session: &'a Session<P, C>, panel: &'a S) -> Self {
        Self { session, panel }
    }

    /// Read-only; needs no account.
    pub async fn check_minter(&self, raw_address: &str) -> Result<bool, AdminError> {
        let address = raw_address.trim();
        debug!(address, "checking minter");
        self.panel.show(Slot::CanMintResult, "Checking...");

        match self.session.contract().is_minter(address).await {
            Ok(is_minter) => {
                self.panel.show(Slot::CanMintResult, yes_no(is_minter));
                Ok(is_minter)
            }
            Err(err) => {
                let err = AdminError::from_call(err);
                warn!(address, "minter check failed: {}", err);
                self.panel.show_error(Slot::CanMintResult, &err.to_string());
                Err(err)
            }
        }
    }

    pub async fn add_minters(&self, raw_list: &str) -> Result<TxHash, AdminError> {
        let minters = input::split_minter_list(raw_list);
        if minters.is_empty() {
            return self.fail(
                Action::AddMinters,
                AdminError::InvalidInput("no minter addresses given".to_owned()),
            );
        }
        debug!(?minters, "adding minters");
        let contract = self.session.contract();
        self.submit(Action::AddMinters, |tx| contract.add_to_minters(&minters, tx))
            .await
    }

    /// Always attaches the fixed mint price; the node decides whether the
    /// balance covers it.
    pub async fn mint(&self) -> Result<TxHash, AdminError> {
        let contract = self.session.contract();
        self.submit(Action::Mint, |tx| contract.mint(tx.with_value(MINT_PRICE_WEI)))
            .await
    }

    pub async fn set_minting_paused(&self, paused: bool) -> Result<TxHash, AdminError> {
        let contract = self.session.contract();
        self.submit(Action::SetMintingPaused(paused), |tx| {
            contract.set_minting_paused(paused, tx)
        })
        .await
    }

    pub async fn set_allow_public_mint(&self, allowed: bool) -> Result<TxHash, AdminError> {
        let contract = self.session.contract();
        self.submit(Action::SetAllowPublicMint(allowed), |tx| {
            contract.set_allow_public_mint(allowed, tx)
        })
        .await
    }

    pub async fn set_base_uri(&self, raw_uri: &str) -> Result<TxHash, AdminError> {
        let uri = input::normalize_base_uri(raw_uri);
        debug!(%uri, "setting base URI");
        let contract = self.session.contract();
        self.submit(Action::SetBaseUri, |tx| contract.set_base_uri(&uri, tx))
            .await
    }

    pub async fn withdraw(&self) -> Result<TxHash, AdminError> {
        let contract = self.session.contract();
        self.submit(Action::Withdraw, |tx| contract.withdraw(tx)).await
    }

    /// Destructive: nothing is sent unless `confirm` accepts.
    pub async fn transfer_ownership(
        &self,
        raw_owner: &str,
        confirm: &impl Confirm,
    ) -> Result<TxHash, AdminError> {
        let new_owner = input::normalize_owner(raw_owner);
        if new_owner.is_empty() {
            return self.fail(
                Action::TransferOwnership,
                AdminError::InvalidInput("new owner address is required".to_owned()),
            );
        }
        if !confirm.confirm(&input::ownership_prompt(&new_owner)) {
            info!(%new_owner, "ownership transfer cancelled");
            self.panel
                .show(Slot::ActionResult, "Transfer ownership cancelled");
            return Err(AdminError::Cancelled);
        }

        let contract = self.session.contract();
        self.submit(Action::TransferOwnership, |tx| {
            contract.transfer_ownership(&new_owner, tx)
        })
        .await
    }

    async fn submit<F, Fut>(&self, action: Action, call: F) -> Result<TxHash, AdminError>
    where
        F: FnOnce(TxOptions) -> Fut,
        Fut: Future<Output = anyhow::Result<TxHash>>,
    {
        let from = match self.session.connection().resolve_account().await {
            Ok(account) => account,
            Err(err) => return self.fail(action, err),
        };

        match call(TxOptions::from_account(from)).await {
            Ok(hash) => {
                info!(%action, tx = %hash.0, "transaction submitted");
                self.panel
                    .show(Slot::ActionResult, &format!("{action} submitted: {}", hash.0));
                if action.refreshes() {
                    refresh::refresh(self.session, self.panel).await;
                }
                Ok(hash)
            }
            Err(err) => self.fail(action, AdminError::from_call(err)),
        }
    }

    fn fail<T>(&self, action: Action, err: AdminError) -> Result<T, AdminError> {
        warn!(%action, "action failed: {}", err);
        self.panel
            .show_error(Slot::ActionResult, &format!("{action} failed: {err}"));
        Err(err)
    }
}
