//! Command handlers for `cfk`.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod query;
pub mod resolve;

use anyhow::{Context, Result};
use cfk_contracts::{parse_roster_file, parse_utc, ContractStore, RosterOptions};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Fallback for `--contracts` when the flag is omitted.
pub const ENV_CONTRACTS_CSV: &str = "CFK_CONTRACTS_CSV";

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Parse a CLI timestamp: `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_as_of(flag: &str, raw: &str) -> Result<DateTime<Utc>> {
    parse_utc(raw).with_context(|| {
        format!("invalid {flag} '{raw}'. expected YYYY-MM-DD or RFC 3339")
    })
}

/// `--contracts` if given, else `$CFK_CONTRACTS_CSV`.
pub fn contracts_path(flag: Option<String>) -> Result<String> {
    match flag {
        Some(p) => Ok(p),
        None => std::env::var(ENV_CONTRACTS_CSV).with_context(|| {
            format!("no contract roster: pass --contracts or set {ENV_CONTRACTS_CSV}")
        }),
    }
}

pub fn load_store(path: &str, derive_auto_close: bool) -> Result<ContractStore> {
    let opts = RosterOptions { derive_auto_close };
    let records = parse_roster_file(Path::new(path), &opts)
        .with_context(|| format!("failed to read contract roster: {path}"))?;
    let store = ContractStore::from_records(records)
        .with_context(|| format!("invalid contract roster: {path}"))?;
    Ok(store)
}
