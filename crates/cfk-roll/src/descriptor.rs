//! Continuous future descriptors.
//!
//! A [`ContinuousFuture`] stands in for "the Nth nearest contract of root R
//! under roll policy P". Its identity ([`ContinuousFutureSid`]) is a UUIDv5
//! over the `(root_symbol, offset, roll_style)` triple:
//!
//! - the same triple always yields the same sid, in any process;
//! - triples that differ in any field (offset included) never share a sid.
//!
//! **No RNG.** The derivation prefix `"cfk-roll.continuous_future.v1"` scopes
//! the hash within the DNS namespace.

use std::fmt;

use uuid::Uuid;

use crate::error::RollError;
use crate::policy::RollStyle;

/// Stable identity of a continuous future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContinuousFutureSid(Uuid);

impl ContinuousFutureSid {
    fn derive(root_symbol: &str, offset: u32, roll_style: RollStyle) -> Self {
        let data = format!(
            "cfk-roll.continuous_future.v1|{}|{}|{}",
            root_symbol,
            offset,
            roll_style.as_str()
        );
        Self(Uuid::new_v5(&Uuid::NAMESPACE_DNS, data.as_bytes()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, RollError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| RollError::invalid(format!("invalid sid '{s}': {e}")))
    }
}

impl fmt::Display for ContinuousFutureSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A synthetic, non-expiring instrument resolved through a roll policy.
///
/// Equality is structural over all fields; the sid is a pure function of the
/// other three, so two descriptors are equal iff root, offset and style are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContinuousFuture {
    root_symbol: String,
    offset: u32,
    roll_style: RollStyle,
    sid: ContinuousFutureSid,
}

impl ContinuousFuture {
    /// Typed constructor. Fails only on an empty root symbol.
    pub fn new(
        root_symbol: impl Into<String>,
        offset: u32,
        roll_style: RollStyle,
    ) -> Result<Self, RollError> {
        let root_symbol = root_symbol.into().trim().to_string();
        if root_symbol.is_empty() {
            return Err(RollError::invalid("root_symbol must not be empty"));
        }
        let sid = ContinuousFutureSid::derive(&root_symbol, offset, roll_style);
        Ok(Self {
            root_symbol,
            offset,
            roll_style,
            sid,
        })
    }

    /// Untyped constructor for callers holding raw parameters (config, CLI).
    ///
    /// Rejects a negative or oversized `offset` and an unknown `roll_style`.
    pub fn from_parts(root_symbol: &str, offset: i64, roll_style: &str) -> Result<Self, RollError> {
        if offset < 0 {
            return Err(RollError::invalid(format!(
                "offset must be >= 0, got {offset}"
            )));
        }
        let offset = u32::try_from(offset)
            .map_err(|_| RollError::invalid(format!("offset {offset} is too large")))?;
        let roll_style: RollStyle = roll_style.parse()?;
        Self::new(root_symbol, offset, roll_style)
    }

    pub fn root_symbol(&self) -> &str {
        &self.root_symbol
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn roll_style(&self) -> RollStyle {
        self.roll_style
    }

    pub fn sid(&self) -> ContinuousFutureSid {
        self.sid
    }
}

impl fmt::Display for ContinuousFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.root_symbol, self.offset, self.roll_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_its_parameters() {
        let cf = ContinuousFuture::new("FO", 1, RollStyle::Calendar).unwrap();
        assert_eq!(cf.root_symbol(), "FO");
        assert_eq!(cf.offset(), 1);
        assert_eq!(cf.roll_style(), RollStyle::Calendar);
        assert_eq!(cf.to_string(), "FO/1/calendar");
    }

    #[test]
    fn same_triple_same_identity() {
        let a = ContinuousFuture::new("FO", 0, RollStyle::Calendar).unwrap();
        let b = ContinuousFuture::from_parts("FO", 0, "calendar").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sid(), b.sid());
    }

    #[test]
    fn offset_changes_identity() {
        let a = ContinuousFuture::new("FO", 0, RollStyle::Calendar).unwrap();
        let b = ContinuousFuture::new("FO", 1, RollStyle::Calendar).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.sid(), b.sid());
    }

    #[test]
    fn negative_offset_is_rejected() {
        let err = ContinuousFuture::from_parts("FO", -1, "calendar").unwrap_err();
        assert!(matches!(err, RollError::InvalidDescriptorParameters { .. }));
    }

    #[test]
    fn blank_root_is_rejected() {
        assert!(ContinuousFuture::new("  ", 0, RollStyle::Calendar).is_err());
    }

    #[test]
    fn sid_parses_from_its_display_form() {
        let cf = ContinuousFuture::new("FO", 0, RollStyle::Calendar).unwrap();
        let parsed = ContinuousFutureSid::parse(&cf.sid().to_string()).unwrap();
        assert_eq!(parsed, cf.sid());
        assert!(ContinuousFutureSid::parse("not-a-uuid").is_err());
    }
}
