//! Roll schedule over a date range.
//!
//! The resolution is piecewise constant in `as_of`: it can only change at an
//! instant equal to some contract's `start_date` (the contract becomes
//! visible) or `auto_close_date` (the contract rolls off). Evaluating
//! [`current_contract`] at the range start and at each such instant is
//! therefore exact. No trading calendar is needed.
//!
//! Stretches where nothing resolves are kept as [`Resolution::Unresolved`]
//! segments carrying the error, and scanning continues past them, so a root
//! that lists a new contract after a gap shows up again.

use std::collections::BTreeSet;
use std::mem;

use cfk_contracts::{ContractRecord, RootSymbolGroup};
use chrono::{DateTime, Utc};

use crate::descriptor::ContinuousFuture;
use crate::error::RollError;
use crate::resolver::current_contract;

/// What a descriptor resolves to over one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'g> {
    Resolved(&'g ContractRecord),
    /// The error reported at the segment's `active_from`.
    Unresolved(RollError),
}

impl Resolution<'_> {
    /// Same contract, or the same kind of failure.
    fn continues(&self, next: &Resolution<'_>) -> bool {
        match (self, next) {
            (Resolution::Resolved(a), Resolution::Resolved(b)) => a == b,
            (Resolution::Unresolved(a), Resolution::Unresolved(b)) => {
                mem::discriminant(a) == mem::discriminant(b)
            }
            _ => false,
        }
    }
}

/// One constant stretch of a roll schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSegment<'g> {
    pub resolution: Resolution<'g>,
    /// First instant (inclusive) of the segment.
    pub active_from: DateTime<Utc>,
    /// Exclusive end: the next segment's `active_from`. `None` on the last
    /// segment, which runs through the end of the range.
    pub active_until: Option<DateTime<Utc>>,
}

impl<'g> RollSegment<'g> {
    pub fn contract(&self) -> Option<&'g ContractRecord> {
        match self.resolution {
            Resolution::Resolved(c) => Some(c),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RollError> {
        match &self.resolution {
            Resolution::Resolved(_) => None,
            Resolution::Unresolved(e) => Some(e),
        }
    }
}

/// Segments covering `[start, end]` in time order. Consecutive instants
/// with the same contract (or the same kind of failure) are merged.
///
/// # Errors
/// - [`RollError::InvalidRange`] if `start > end`.
/// - [`RollError::UnknownRootSymbol`] if `cf` belongs to another root.
///
/// Every other resolution failure becomes an unresolved segment.
pub fn roll_schedule<'g>(
    group: &'g RootSymbolGroup,
    cf: &ContinuousFuture,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<RollSegment<'g>>, RollError> {
    if start > end {
        return Err(RollError::InvalidRange { start, end });
    }
    if cf.root_symbol() != group.root_symbol() {
        return Err(RollError::UnknownRootSymbol {
            root_symbol: cf.root_symbol().to_string(),
        });
    }

    let mut segments: Vec<RollSegment<'g>> = Vec::new();
    let instants = std::iter::once(start).chain(change_points(group, start, end));

    for t in instants {
        let resolution = match current_contract(group, cf, t) {
            Ok(c) => Resolution::Resolved(c),
            Err(e) => Resolution::Unresolved(e),
        };
        if let Some(last) = segments.last_mut() {
            if last.resolution.continues(&resolution) {
                continue;
            }
            last.active_until = Some(t);
        }
        segments.push(RollSegment {
            resolution,
            active_from: t,
            active_until: None,
        });
    }

    Ok(segments)
}

/// Distinct start/auto-close instants in `(start, end]`, ascending.
fn change_points(
    group: &RootSymbolGroup,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BTreeSet<DateTime<Utc>> {
    group
        .contracts()
        .iter()
        .flat_map(|c| [c.start_date, c.auto_close_date])
        .filter(|t| *t > start && *t <= end)
        .collect()
}
