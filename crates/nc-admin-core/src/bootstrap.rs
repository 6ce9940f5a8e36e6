use nc_contract_client::Provider;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::Connection;

/// Where the provider came from, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// EIP-1193 provider injected by a wallet extension.
    Injected,
    /// Pre-EIP-1193 `web3.currentProvider`.
    Legacy,
    /// Fixed local node endpoint.
    Fallback,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Injected => "injected",
            ProviderKind::Legacy => "legacy",
            ProviderKind::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Injected beats legacy beats fallback. The fallback is only built when
/// neither browser provider is present.
pub fn select_provider<P>(
    injected: Option<P>,
    legacy: Option<P>,
    fallback: impl FnOnce() -> P,
) -> (ProviderKind, P) {
    if let Some(provider) = injected {
        return (ProviderKind::Injected, provider);
    }
    if let Some(provider) = legacy {
        return (ProviderKind::Legacy, provider);
    }
    (ProviderKind::Fallback, fallback())
}

/// Authorize account access once. Denial is recorded on the connection
/// rather than aborting startup.
pub async fn authorize<P: Provider>(provider: Arc<P>, kind: ProviderKind) -> Connection<P> {
    let accounts = match kind {
        ProviderKind::Injected => provider.request_accounts().await,
        ProviderKind::Legacy | ProviderKind::Fallback => provider.accounts().await,
    };

    let auth_failure = match accounts {
        Ok(accounts) if !accounts.is_empty() => {
            info!(provider = provider.name(), %kind, account = %accounts[0].0, "account access granted");
            None
        }
        Ok(_) => Some("provider exposes no accounts".to_owned()),
        Err(err) => Some(format!("{err:#}")),
    };

    if let Some(reason) = &auth_failure {
        warn!(provider = provider.name(), %kind, "account access not granted: {}", reason);
    }

    Connection::new(provider, kind, auth_failure)
}

pub async fn bootstrap<P: Provider>(
    injected: Option<P>,
    legacy: Option<P>,
    fallback: impl FnOnce() -> P,
) -> Connection<P> {
    let (kind, provider) = select_provider(injected, legacy, fallback);
    authorize(Arc::new(provider), kind).await
}
