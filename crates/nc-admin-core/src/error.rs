use nc_contract_client::BindingError;
use nc_contract_client::abi::AbiError;
use thiserror::Error;

/// Every failure an admin action can surface to the status panel.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("account access denied: {0}")]
    Authorization(String),
    #[error("no account available: {0}")]
    NoAccount(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("remote call failed: {0}")]
    Call(String),
    #[error("cancelled by user")]
    Cancelled,
}

impl AdminError {
    /// Classify an error coming back from the contract handle: arguments the
    /// codec rejected are input errors, everything else is a call failure.
    pub fn from_call(err: anyhow::Error) -> Self {
        if let Some(abi) = err.downcast_ref::<AbiError>() {
            return AdminError::InvalidInput(abi.to_string());
        }
        AdminError::Call(format!("{err:#}"))
    }
}
