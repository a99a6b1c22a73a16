use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::error::ContractError;
use crate::micros::Micros;

/// Immutable metadata for one dated futures contract.
///
/// All dates are UTC instants. A date-only source value (`2016-01-26`) maps to
/// midnight UTC, so a contract whose `auto_close_date` is that day is already
/// closed for every bar of the 2016-01-26 session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractRecord {
    /// Exchange symbol, e.g. `"FOF16"`. Unique within a store.
    pub symbol: String,
    /// Family name shared by successive contracts, e.g. `"FO"`.
    pub root_symbol: String,
    pub asset_name: Option<String>,
    /// First instant the contract is tradeable.
    pub start_date: DateTime<Utc>,
    /// Last instant with data for the contract.
    pub end_date: DateTime<Utc>,
    pub notice_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    /// From this instant on the contract can no longer be "current".
    pub auto_close_date: DateTime<Utc>,
    pub multiplier: Micros,
    pub tick_size: Micros,
    pub exchange: String,
}

impl ContractRecord {
    /// `true` once the contract has begun trading (`start_date <= as_of`).
    #[inline]
    pub fn has_started(&self, as_of: DateTime<Utc>) -> bool {
        self.start_date <= as_of
    }

    /// `true` once `as_of` has reached the auto-close instant.
    ///
    /// The boundary is inclusive: at exactly `auto_close_date` the contract
    /// has already rolled off.
    #[inline]
    pub fn has_auto_closed(&self, as_of: DateTime<Utc>) -> bool {
        self.auto_close_date <= as_of
    }

    /// Deterministic chain order: `auto_close_date`, then `start_date`, then
    /// `symbol`.
    pub fn chain_order(&self, other: &ContractRecord) -> Ordering {
        self.auto_close_date
            .cmp(&other.auto_close_date)
            .then_with(|| self.start_date.cmp(&other.start_date))
            .then_with(|| self.symbol.cmp(&other.symbol))
    }

    /// Ingestion-time consistency checks.
    ///
    /// - `symbol` and `root_symbol` are non-empty.
    /// - `start_date <= end_date`.
    /// - notice, expiration and auto-close dates fall in `[start_date, end_date]`.
    /// - `multiplier` and `tick_size` are strictly positive.
    pub fn validate(&self) -> Result<(), ContractError> {
        let sym = self.symbol.as_str();

        if sym.trim().is_empty() {
            return Err(ContractError::malformed(sym, "symbol is empty"));
        }
        if self.root_symbol.trim().is_empty() {
            return Err(ContractError::malformed(sym, "root_symbol is empty"));
        }
        if self.start_date > self.end_date {
            return Err(ContractError::malformed(
                sym,
                format!(
                    "start_date {} is after end_date {}",
                    self.start_date.to_rfc3339(),
                    self.end_date.to_rfc3339()
                ),
            ));
        }

        let lifetime_dates = [
            ("notice_date", self.notice_date),
            ("expiration_date", self.expiration_date),
            ("auto_close_date", self.auto_close_date),
        ];
        for (field, ts) in lifetime_dates {
            if ts < self.start_date {
                return Err(ContractError::malformed(
                    sym,
                    format!(
                        "{field} {} is before start_date {}",
                        ts.to_rfc3339(),
                        self.start_date.to_rfc3339()
                    ),
                ));
            }
            if ts > self.end_date {
                return Err(ContractError::malformed(
                    sym,
                    format!(
                        "{field} {} is after end_date {}",
                        ts.to_rfc3339(),
                        self.end_date.to_rfc3339()
                    ),
                ));
            }
        }

        if !self.multiplier.is_positive() {
            return Err(ContractError::malformed(
                sym,
                format!("multiplier must be > 0, got {}", self.multiplier),
            ));
        }
        if !self.tick_size.is_positive() {
            return Err(ContractError::malformed(
                sym,
                format!("tick_size must be > 0, got {}", self.tick_size),
            ));
        }

        Ok(())
    }
}
