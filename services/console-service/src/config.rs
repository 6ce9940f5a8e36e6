use anyhow::{Context, Result};
use nc_rpc_http::LOCAL_FALLBACK_URL;
use std::net::SocketAddr;
use std::path::PathBuf;

pub(crate) const DEFAULT_DESCRIPTOR_PATH: &str = "./contracts/NftConsole.json";
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub(crate) struct ServiceConfig {
    pub(crate) rpc_url: String,
    pub(crate) descriptor_path: PathBuf,
    pub(crate) bind_addr: SocketAddr,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let bind_addr = value("NC_BIND_ADDR", DEFAULT_BIND_ADDR);
        Ok(Self {
            rpc_url: value("NC_RPC_URL", LOCAL_FALLBACK_URL),
            descriptor_path: PathBuf::from(value("NC_DESCRIPTOR_PATH", DEFAULT_DESCRIPTOR_PATH)),
            bind_addr: bind_addr
                .parse()
                .with_context(|| format!("NC_BIND_ADDR '{bind_addr}' is not a socket address"))?,
        })
    }
}
