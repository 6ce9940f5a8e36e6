//! Hand-written doubles shared by the unit tests.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use nc_api_types::{AccountAddress, CallRequest, NetworkId, TransactionRequest, TxHash};
use nc_contract_client::{NftContract, Provider, TxOptions};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Confirm, Slot, StatusPanel};

pub const SENDER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const OWNER: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

#[derive(Default)]
pub struct MockProvider {
    accounts: Vec<AccountAddress>,
    deny: bool,
    locked: bool,
    auth_requests: AtomicUsize,
}

impl MockProvider {
    pub fn with_account() -> Self {
        Self {
            accounts: vec![AccountAddress(SENDER.to_owned())],
            ..Default::default()
        }
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Default::default()
        }
    }

    /// Accounts query itself errors, as a locked wallet does.
    pub fn locked() -> Self {
        Self {
            locked: true,
            ..Default::default()
        }
    }

    pub fn authorization_requests(&self) -> usize {
        self.auth_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn request_accounts(&self) -> Result<Vec<AccountAddress>> {
        self.auth_requests.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            bail!("User rejected the request.");
        }
        Ok(self.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<AccountAddress>> {
        if self.locked {
            bail!("wallet is locked");
        }
        Ok(self.accounts.clone())
    }

    async fn network_id(&self) -> Result<NetworkId> {
        Ok(NetworkId("5777".to_owned()))
    }

    async fn call(&self, _req: CallRequest) -> Result<String> {
        bail!("mock provider does not execute calls")
    }

    async fn send_transaction(&self, _req: TransactionRequest) -> Result<TxHash> {
        bail!("mock provider does not send transactions")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    IsMinter(String),
    SetAllowPublicMint(bool, TxOptions),
    SetMintingPaused(bool, TxOptions),
    Mint(TxOptions),
    AddToMinters(Vec<String>, TxOptions),
    SetBaseUri(String, TxOptions),
    Withdraw(TxOptions),
    TransferOwnership(String, TxOptions),
}

/// Contract double holding plain state and recording every call.
pub struct MockContract {
    pub minting_paused: bool,
    pub public_mint: bool,
    pub base_uri: String,
    pub owner: String,
    pub minters: Vec<String>,
    pub fail_base_uri: bool,
    pub revert: Option<String>,
    pub(crate) calls: Mutex<Vec<Recorded>>,
    pub(crate) state_reads: AtomicUsize,
}

impl Default for MockContract {
    fn default() -> Self {
        Self {
            minting_paused: true,
            public_mint: false,
            base_uri: "ipfs://collection/".to_owned(),
            owner: OWNER.to_owned(),
            minters: Vec::new(),
            fail_base_uri: false,
            revert: None,
            calls: Mutex::new(Vec::new()),
            state_reads: AtomicUsize::new(0),
        }
    }
}

impl MockContract {
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `mintingPaused()` was read, i.e. refresh count.
    pub fn refreshes(&self) -> usize {
        self.state_reads.load(Ordering::SeqCst)
    }

    fn record(&self, call: Recorded) -> Result<TxHash> {
        if let Some(reason) = &self.revert {
            return Err(anyhow!("execution reverted: {reason}"));
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        Ok(TxHash(format!("0xhash{}", calls.len())))
    }
}

#[async_trait]
impl NftContract for MockContract {
    async fn minting_paused(&self) -> Result<bool> {
        self.state_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.minting_paused)
    }

    async fn allow_public_mint(&self) -> Result<bool> {
        Ok(self.public_mint)
    }

    async fn base_uri(&self) -> Result<String> {
        if self.fail_base_uri {
            bail!("BASE_URI() call: header not found");
        }
        Ok(self.base_uri.clone())
    }

    async fn owner(&self) -> Result<String> {
        Ok(self.owner.clone())
    }

    async fn is_minter(&self, address: &str) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(Recorded::IsMinter(address.to_owned()));
        Ok(self.minters.iter().any(|m| m == address))
    }

    async fn set_allow_public_mint(&self, allowed: bool, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::SetAllowPublicMint(allowed, tx))
    }

    async fn set_minting_paused(&self, paused: bool, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::SetMintingPaused(paused, tx))
    }

    async fn mint(&self, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::Mint(tx))
    }

    async fn add_to_minters(&self, addresses: &[String], tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::AddToMinters(addresses.to_vec(), tx))
    }

    async fn set_base_uri(&self, uri: &str, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::SetBaseUri(uri.to_owned(), tx))
    }

    async fn withdraw(&self, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::Withdraw(tx))
    }

    async fn transfer_ownership(&self, new_owner: &str, tx: TxOptions) -> Result<TxHash> {
        self.record(Recorded::TransferOwnership(new_owner.to_owned(), tx))
    }
}

/// Panel that remembers the latest text per slot plus the full history.
#[derive(Default)]
pub struct RecordingPanel {
    latest: Mutex<HashMap<Slot, (String, bool)>>,
    history: Mutex<Vec<(Slot, String)>>,
}

impl RecordingPanel {
    pub fn text(&self, slot: Slot) -> Option<String> {
        self.latest.lock().unwrap().get(&slot).map(|(t, _)| t.clone())
    }

    pub fn is_error(&self, slot: Slot) -> bool {
        self.latest
            .lock()
            .unwrap()
            .get(&slot)
            .is_some_and(|(_, error)| *error)
    }

    pub fn history(&self, slot: Slot) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == slot)
            .map(|(_, t)| t.clone())
            .collect()
    }

    fn write(&self, slot: Slot, text: &str, error: bool) {
        self.latest
            .lock()
            .unwrap()
            .insert(slot, (text.to_owned(), error));
        self.history.lock().unwrap().push((slot, text.to_owned()));
    }
}

impl StatusPanel for RecordingPanel {
    fn show(&self, slot: Slot, text: &str) {
        self.write(slot, text, false);
    }

    fn show_error(&self, slot: Slot, message: &str) {
        self.write(slot, message, true);
    }
}

/// Scripted confirmation dialog.
pub struct Answer {
    accept: bool,
    prompts: Mutex<Vec<String>>,
}

impl Answer {
    pub fn yes() -> Self {
        Self {
            accept: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            accept: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for Answer {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_owned());
        self.accept
    }
}
