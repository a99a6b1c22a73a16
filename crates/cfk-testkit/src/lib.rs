//! Shared fixtures for cfk scenario tests.
//!
//! The `FO` roster mirrors a five-contract root: four consecutive monthly
//! contracts rolling on the 26th of Jan–Apr 2016, plus `FOF22`, which is
//! listed but does not start trading until 2021-01-05.

use cfk_contracts::{
    parse_roster_str, ContractRecord, ContractStore, RootSymbolGroup, RosterOptions,
};
use chrono::{DateTime, TimeZone, Utc};

/// The FO roster as CSV text (same file the CLI tests hand to `cfk`).
pub const FO_ROSTER_CSV: &str = include_str!("../fixtures/fo_roster.csv");

/// Midnight UTC on the given calendar day.
pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    utc_hm(y, m, d, 0, 0)
}

/// `hh:mm` UTC on the given calendar day.
pub fn utc_hm(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hh, mm, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp {y}-{m}-{d} {hh}:{mm}"))
}

pub fn fo_contracts() -> Vec<ContractRecord> {
    parse_roster_str(FO_ROSTER_CSV, &RosterOptions::default()).expect("parse FO fixture roster")
}

pub fn fo_store() -> ContractStore {
    ContractStore::from_records(fo_contracts()).expect("build FO fixture store")
}

pub fn fo_group() -> RootSymbolGroup {
    fo_store().group("FO").expect("FO group present").clone()
}

/// A contract with the given dates and FO-like economics, for ad-hoc rosters.
pub fn contract(
    symbol: &str,
    root_symbol: &str,
    start_date: DateTime<Utc>,
    auto_close_date: DateTime<Utc>,
) -> ContractRecord {
    let fo = &fo_contracts()[0];
    ContractRecord {
        symbol: symbol.to_string(),
        root_symbol: root_symbol.to_string(),
        asset_name: None,
        start_date,
        end_date: auto_close_date + chrono::Duration::days(180),
        notice_date: auto_close_date,
        expiration_date: auto_close_date,
        auto_close_date,
        multiplier: fo.multiplier,
        tick_size: fo.tick_size,
        exchange: fo.exchange.clone(),
    }
}
