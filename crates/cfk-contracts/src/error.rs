use std::fmt;

/// Errors raised while building or querying contract metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A record failed an ingestion-time consistency check.
    MalformedContractRecord { symbol: String, reason: String },
    /// No contracts are registered under this root symbol.
    UnknownRootSymbol { root_symbol: String },
    /// No contract with this symbol exists in the store.
    UnknownSymbol { symbol: String },
}

impl ContractError {
    pub(crate) fn malformed(symbol: &str, reason: impl Into<String>) -> Self {
        ContractError::MalformedContractRecord {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::MalformedContractRecord { symbol, reason } => {
                write!(f, "malformed contract record '{symbol}': {reason}")
            }
            ContractError::UnknownRootSymbol { root_symbol } => {
                write!(f, "unknown root symbol '{root_symbol}'")
            }
            ContractError::UnknownSymbol { symbol } => {
                write!(f, "unknown contract symbol '{symbol}'")
            }
        }
    }
}

impl std::error::Error for ContractError {}
