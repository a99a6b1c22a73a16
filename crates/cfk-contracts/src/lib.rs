//! cfk-contracts
//!
//! Dated futures contract metadata: the immutable [`ContractRecord`], the
//! chronologically ordered [`RootSymbolGroup`], and the validating
//! [`ContractStore`] that owns every group.
//!
//! Pure data. No wall-clock, no global state. The CSV reader in
//! [`ingest_csv`] is the only I/O, and it never writes.

mod error;
mod group;
pub mod ingest_csv;
mod micros;
mod record;

pub use error::ContractError;
pub use group::{ContractStore, RootSymbolGroup};
pub use ingest_csv::{parse_roster_file, parse_roster_str, parse_utc, RosterError, RosterOptions};
pub use micros::{DecimalError, Micros};
pub use record::ContractRecord;
