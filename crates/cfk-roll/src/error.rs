use std::fmt;

use cfk_contracts::ContractError;
use chrono::{DateTime, Utc};

use crate::descriptor::ContinuousFutureSid;

/// Errors returned by descriptor construction and roll resolution.
///
/// Every variant is surfaced verbatim; nothing in this crate substitutes a
/// default contract for a failed resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    /// No contracts are registered under this root symbol.
    UnknownRootSymbol { root_symbol: String },
    /// Descriptor parameters were rejected at construction time.
    InvalidDescriptorParameters { reason: String },
    /// Every started contract has already auto-closed as of `as_of`.
    NoCurrentContract {
        root_symbol: String,
        as_of: DateTime<Utc>,
    },
    /// `roll_pointer + offset` is past the end of the live roster.
    OffsetOutOfRange {
        root_symbol: String,
        offset: u32,
        roll_pointer: usize,
        available: usize,
        as_of: DateTime<Utc>,
    },
    /// The identity was never minted by the registry.
    UnknownSid { sid: ContinuousFutureSid },
    /// `start > end` for a range query.
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Any other contract-metadata error.
    Contract(ContractError),
}

impl RollError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RollError::InvalidDescriptorParameters {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollError::UnknownRootSymbol { root_symbol } => {
                write!(f, "unknown root symbol '{root_symbol}'")
            }
            RollError::InvalidDescriptorParameters { reason } => {
                write!(f, "invalid continuous future parameters: {reason}")
            }
            RollError::NoCurrentContract { root_symbol, as_of } => write!(
                f,
                "no current contract for '{root_symbol}' as of {}: every started contract has auto-closed",
                as_of.to_rfc3339()
            ),
            RollError::OffsetOutOfRange {
                root_symbol,
                offset,
                roll_pointer,
                available,
                as_of,
            } => write!(
                f,
                "offset {offset} out of range for '{root_symbol}' as of {}: roll pointer {roll_pointer}, {available} contract(s) available",
                as_of.to_rfc3339()
            ),
            RollError::UnknownSid { sid } => write!(f, "unknown continuous future sid {sid}"),
            RollError::InvalidRange { start, end } => write!(
                f,
                "invalid range: start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ),
            RollError::Contract(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RollError::Contract(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContractError> for RollError {
    fn from(e: ContractError) -> Self {
        match e {
            ContractError::UnknownRootSymbol { root_symbol } => {
                RollError::UnknownRootSymbol { root_symbol }
            }
            other => RollError::Contract(other),
        }
    }
}
