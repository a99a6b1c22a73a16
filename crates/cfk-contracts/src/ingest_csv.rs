//! CSV reader for contract rosters.
//!
//! Converts CSV text into [`ContractRecord`] values. This is the read side
//! only: records are **not** validated here; hand them to
//! [`crate::ContractStore::from_records`], which applies the consistency
//! checks.
//!
//! ## Column contract (case-insensitive, order-independent)
//!
//! | Column            | Example       | Notes                                   |
//! |-------------------|---------------|-----------------------------------------|
//! | `symbol`          | `FOF16`       |                                         |
//! | `root_symbol`     | `FO`          |                                         |
//! | `asset_name`      | `Foo`         | optional column, may be empty           |
//! | `start_date`      | `2015-01-05`  | `YYYY-MM-DD` (midnight UTC) or RFC 3339 |
//! | `end_date`        | `2016-08-19`  |                                         |
//! | `notice_date`     | `2016-01-26`  |                                         |
//! | `expiration_date` | `2016-01-26`  |                                         |
//! | `auto_close_date` | `2016-01-26`  | optional; see [`RosterOptions`]         |
//! | `multiplier`      | `1000.0`      | decimal string, at most 6 places        |
//! | `tick_size`       | `0.001`       | decimal string, at most 6 places        |
//! | `exchange`        | `CME`         |                                         |

use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::micros::Micros;
use crate::record::ContractRecord;

const REQUIRED_COLUMNS: &[&str] = &[
    "symbol",
    "root_symbol",
    "start_date",
    "end_date",
    "notice_date",
    "expiration_date",
    "multiplier",
    "tick_size",
    "exchange",
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while reading a roster CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// An I/O or CSV-library error.
    Io(String),
    /// The header row is missing a required column.
    MissingHeader(String),
    /// A field could not be parsed into the expected type.
    ParseField {
        row: usize,
        field: &'static str,
        raw: String,
    },
    /// `auto_close_date` is empty and derivation is disabled.
    MissingAutoClose { row: usize, symbol: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(msg) => write!(f, "roster io error: {msg}"),
            RosterError::MissingHeader(col) => {
                write!(f, "roster missing required header column: '{col}'")
            }
            RosterError::ParseField { row, field, raw } => {
                write!(f, "roster row {row}: cannot parse field '{field}' from value '{raw}'")
            }
            RosterError::MissingAutoClose { row, symbol } => {
                write!(
                    f,
                    "roster row {row}: '{symbol}' has no auto_close_date and derivation is disabled"
                )
            }
        }
    }
}

impl std::error::Error for RosterError {}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterOptions {
    /// When a row has no `auto_close_date`, use
    /// `min(notice_date, expiration_date)` instead of failing.
    pub derive_auto_close: bool,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            derive_auto_close: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RosterRow {
    symbol: String,
    root_symbol: String,
    #[serde(default)]
    asset_name: Option<String>,
    start_date: String,
    end_date: String,
    notice_date: String,
    expiration_date: String,
    #[serde(default)]
    auto_close_date: Option<String>,
    multiplier: String,
    tick_size: String,
    exchange: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn parse_roster_file(
    path: &Path,
    opts: &RosterOptions,
) -> Result<Vec<ContractRecord>, RosterError> {
    let file = std::fs::File::open(path)
        .map_err(|e| RosterError::Io(format!("open '{}': {e}", path.display())))?;
    parse_roster_reader(file, opts)
}

/// Parse roster CSV from a string slice (tests, embedded fixtures).
pub fn parse_roster_str(
    src: &str,
    opts: &RosterOptions,
) -> Result<Vec<ContractRecord>, RosterError> {
    parse_roster_reader(src.as_bytes(), opts)
}

pub fn parse_roster_reader<R: Read>(
    reader: R,
    opts: &RosterOptions,
) -> Result<Vec<ContractRecord>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| RosterError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect::<csv::StringRecord>();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *col) {
            return Err(RosterError::MissingHeader(col.to_string()));
        }
    }
    rdr.set_headers(headers);

    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<RosterRow>().enumerate() {
        // 1-based, header = row 1
        let row_num = i + 2;
        let row = result.map_err(|e| RosterError::Io(format!("row {row_num}: {e}")))?;
        out.push(row_to_record(row, row_num, opts)?);
    }
    Ok(out)
}

/// Parse `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn row_to_record(
    row: RosterRow,
    row_num: usize,
    opts: &RosterOptions,
) -> Result<ContractRecord, RosterError> {
    let date = |field: &'static str, raw: &str| {
        parse_utc(raw).ok_or_else(|| RosterError::ParseField {
            row: row_num,
            field,
            raw: raw.to_string(),
        })
    };
    let decimal = |field: &'static str, raw: &str| {
        Micros::parse(raw).map_err(|_| RosterError::ParseField {
            row: row_num,
            field,
            raw: raw.to_string(),
        })
    };

    let start_date = date("start_date", &row.start_date)?;
    let end_date = date("end_date", &row.end_date)?;
    let notice_date = date("notice_date", &row.notice_date)?;
    let expiration_date = date("expiration_date", &row.expiration_date)?;

    let auto_close_date = match row.auto_close_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => date("auto_close_date", raw)?,
        _ if opts.derive_auto_close => notice_date.min(expiration_date),
        _ => {
            return Err(RosterError::MissingAutoClose {
                row: row_num,
                symbol: row.symbol,
            })
        }
    };

    Ok(ContractRecord {
        multiplier: decimal("multiplier", &row.multiplier)?,
        tick_size: decimal("tick_size", &row.tick_size)?,
        symbol: row.symbol,
        root_symbol: row.root_symbol,
        asset_name: row.asset_name.filter(|s| !s.trim().is_empty()),
        start_date,
        end_date,
        notice_date,
        expiration_date,
        auto_close_date,
        exchange: row.exchange,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "symbol,root_symbol,start_date,end_date,notice_date,expiration_date,auto_close_date,multiplier,tick_size,exchange";

    #[test]
    fn parse_utc_accepts_dates_and_rfc3339() {
        assert_eq!(
            parse_utc("2016-01-26"),
            Some(Utc.with_ymd_and_hms(2016, 1, 26, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_utc("2016-01-26T14:31:00+00:00"),
            Some(Utc.with_ymd_and_hms(2016, 1, 26, 14, 31, 0).unwrap())
        );
        assert_eq!(parse_utc("26/01/2016"), None);
    }

    #[test]
    fn empty_auto_close_is_derived_from_notice_and_expiration() {
        let src = format!(
            "{HEADER}\nESH16,ES,2015-03-01,2016-03-31,2016-03-10,2016-03-18,,50,0.25,CME\n"
        );
        let recs = parse_roster_str(&src, &RosterOptions::default()).unwrap();
        assert_eq!(
            recs[0].auto_close_date,
            Utc.with_ymd_and_hms(2016, 3, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(recs[0].asset_name, None);
    }

    #[test]
    fn empty_auto_close_without_derivation_fails() {
        let src = format!(
            "{HEADER}\nESH16,ES,2015-03-01,2016-03-31,2016-03-10,2016-03-18,,50,0.25,CME\n"
        );
        let opts = RosterOptions {
            derive_auto_close: false,
        };
        assert_eq!(
            parse_roster_str(&src, &opts),
            Err(RosterError::MissingAutoClose {
                row: 2,
                symbol: "ESH16".to_string()
            })
        );
    }

    #[test]
    fn headers_are_case_insensitive_and_order_independent() {
        let src = "EXCHANGE,Tick_Size,MULTIPLIER,auto_close_date,expiration_date,notice_date,end_date,start_date,ROOT_SYMBOL,Symbol\n\
                   CME,0.001,1000.0,2016-01-26,2016-01-26,2016-01-26,2016-08-19,2015-01-05,FO,FOF16\n";
        let recs = parse_roster_str(src, &RosterOptions::default()).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].symbol, "FOF16");
        assert_eq!(recs[0].tick_size, Micros::new(1_000));
    }

    #[test]
    fn missing_required_header_is_reported() {
        let src = "symbol,root_symbol\nFOF16,FO\n";
        assert_eq!(
            parse_roster_str(src, &RosterOptions::default()),
            Err(RosterError::MissingHeader("start_date".to_string()))
        );
    }

    #[test]
    fn bad_decimal_reports_row_and_field() {
        let src = format!(
            "{HEADER}\nFOF16,FO,2015-01-05,2016-08-19,2016-01-26,2016-01-26,2016-01-26,lots,0.001,CME\n"
        );
        assert_eq!(
            parse_roster_str(&src, &RosterOptions::default()),
            Err(RosterError::ParseField {
                row: 2,
                field: "multiplier",
                raw: "lots".to_string()
            })
        );
    }
}
