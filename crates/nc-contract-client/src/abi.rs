//! Solidity ABI surface of the NFT contract.
//!
//! Every callable method is declared once in `sol!`; the generated call types
//! carry the canonical signature, the selector and the codec.

use alloy_primitives::Address;
use alloy_sol_types::{SolCall, sol};
use anyhow::{Context, Result};
use thiserror::Error;

sol! {
    function mintingPaused() external view returns (bool);
    function allowPublicMint() external view returns (bool);
    function BASE_URI() external view returns (string);
    function owner() external view returns (address);
    function isMinter(address account) external view returns (bool);

    function setAllowPublicMint(bool allowed) external;
    function setMintingPaused(bool paused) external;
    function mint() external payable;
    function addToMinters(address[] minters) external;
    function setBaseURI(string uri) external;
    function withdraw() external;
    function transferOwnership(address new_owner) external;
}

/// Argument rejected before anything is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

/// Parse a 20-byte hex address, with or without a `0x`/`0X` prefix.
pub fn parse_address(input: &str) -> Result<Address, AbiError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 40 {
        return Err(AbiError::InvalidAddress(input.to_owned()));
    }
    digits
        .parse::<Address>()
        .map_err(|_| AbiError::InvalidAddress(input.to_owned()))
}

/// `0x`-prefixed calldata for `eth_call` / `eth_sendTransaction`.
pub fn calldata<C: SolCall>(call: &C) -> String {
    format!("0x{}", hex::encode(call.abi_encode()))
}

/// Decode the hex string an `eth_call` returns.
pub fn decode_hex(data: &str) -> Result<Vec<u8>> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(digits).with_context(|| format!("invalid hex return data '{data}'"))
}

/// Decode a call's return data; malformed replies are errors, never panics.
pub fn decode_returns<C: SolCall>(data: &[u8]) -> Result<C::Return> {
    C::abi_decode_returns(data)
        .with_context(|| format!("{} returned malformed data", C::SIGNATURE))
}
