//! Roll policies.
//!
//! A policy decides only one thing: the **roll pointer**, i.e. the index of
//! the first contract that is still eligible to be current. Filtering by
//! start date, chain ordering and offset indexing are shared by every policy
//! and live in the resolver.
//!
//! Adding a policy means adding a variant here plus its pointer function.
//! The resolver's public contract does not change.

use std::fmt;
use std::str::FromStr;

use cfk_contracts::ContractRecord;
use chrono::{DateTime, Utc};

use crate::error::RollError;

/// Closed set of supported roll policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RollStyle {
    /// Roll on `auto_close_date`: a contract stops being current at the
    /// first instant `as_of >= auto_close_date`.
    Calendar,
}

impl RollStyle {
    pub const ALL: &'static [RollStyle] = &[RollStyle::Calendar];

    pub fn as_str(&self) -> &'static str {
        match self {
            RollStyle::Calendar => "calendar",
        }
    }

    /// Index into `live` of the first contract eligible to be current, or
    /// `None` when every contract has rolled off.
    ///
    /// `live` must be in chain order and contain only started contracts.
    pub fn roll_pointer(&self, live: &[&ContractRecord], as_of: DateTime<Utc>) -> Option<usize> {
        match self {
            RollStyle::Calendar => calendar_pointer(live, as_of),
        }
    }
}

impl fmt::Display for RollStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RollStyle {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(RollStyle::Calendar),
            other => Err(RollError::invalid(format!(
                "unsupported roll_style '{other}'. expected one of: calendar"
            ))),
        }
    }
}

fn calendar_pointer(live: &[&ContractRecord], as_of: DateTime<Utc>) -> Option<usize> {
    // Chain order sorts by auto_close_date first, so the closed contracts
    // form a prefix.
    let idx = live.partition_point(|c| c.has_auto_closed(as_of));
    (idx < live.len()).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("calendar".parse::<RollStyle>().unwrap(), RollStyle::Calendar);
        assert_eq!(" Calendar ".parse::<RollStyle>().unwrap(), RollStyle::Calendar);
    }

    #[test]
    fn unknown_style_is_invalid_parameters() {
        let err = "volume".parse::<RollStyle>().unwrap_err();
        assert!(matches!(err, RollError::InvalidDescriptorParameters { .. }));
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for style in RollStyle::ALL {
            assert_eq!(style.to_string().parse::<RollStyle>().unwrap(), *style);
        }
    }

    #[test]
    fn empty_roster_has_no_pointer() {
        assert_eq!(RollStyle::Calendar.roll_pointer(&[], Utc::now()), None);
    }
}
