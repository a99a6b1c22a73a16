//! Roll resolution: current contract and forward chain.
//!
//! Both operations are pure functions of (group, descriptor, as_of):
//!
//! 1. keep contracts with `start_date <= as_of`;
//! 2. chain order (`auto_close_date`, `start_date`, `symbol`);
//! 3. roll pointer = first contract still eligible under the descriptor's
//!    policy (calendar: first with `auto_close_date > as_of`);
//! 4. chain = everything from `roll_pointer + offset` to the end;
//! 5. current contract = chain head.
//!
//! Contracts before the roll pointer are gone from the chain entirely. On the
//! exact instant of a contract's `auto_close_date` the next contract is
//! already primary.

use cfk_contracts::{ContractRecord, RootSymbolGroup};
use chrono::{DateTime, Utc};

use crate::descriptor::ContinuousFuture;
use crate::error::RollError;
use crate::policy::RollStyle;

/// Contracts that have started trading as of `as_of`, in chain order.
///
/// [`RootSymbolGroup`] already holds its roster in chain order, and a filter
/// preserves it.
pub fn live_contracts(group: &RootSymbolGroup, as_of: DateTime<Utc>) -> Vec<&ContractRecord> {
    group
        .contracts()
        .iter()
        .filter(|c| c.has_started(as_of))
        .collect()
}

/// Index of the roll pointer within [`live_contracts`] for `roll_style`.
///
/// # Errors
/// [`RollError::NoCurrentContract`] when every started contract has rolled
/// off.
pub fn roll_pointer(
    group: &RootSymbolGroup,
    roll_style: RollStyle,
    as_of: DateTime<Utc>,
) -> Result<usize, RollError> {
    let live = live_contracts(group, as_of);
    pointer_in(group, &live, roll_style, as_of)
}

/// The contract `cf` resolves to as of `as_of`.
pub fn current_contract<'g>(
    group: &'g RootSymbolGroup,
    cf: &ContinuousFuture,
    as_of: DateTime<Utc>,
) -> Result<&'g ContractRecord, RollError> {
    let (live, start) = resolve(group, cf, as_of)?;
    Ok(live[start])
}

/// The forward chain for `cf` as of `as_of`: the current contract followed by
/// every later contract that has started trading.
///
/// Never empty on success.
pub fn current_chain<'g>(
    group: &'g RootSymbolGroup,
    cf: &ContinuousFuture,
    as_of: DateTime<Utc>,
) -> Result<Vec<&'g ContractRecord>, RollError> {
    let (mut live, start) = resolve(group, cf, as_of)?;
    Ok(live.split_off(start))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Shared filter/order/scan/offset step. Returns the live roster and the
/// in-bounds index of the chain head.
fn resolve<'g>(
    group: &'g RootSymbolGroup,
    cf: &ContinuousFuture,
    as_of: DateTime<Utc>,
) -> Result<(Vec<&'g ContractRecord>, usize), RollError> {
    if cf.root_symbol() != group.root_symbol() {
        return Err(RollError::UnknownRootSymbol {
            root_symbol: cf.root_symbol().to_string(),
        });
    }

    let live = live_contracts(group, as_of);
    let pointer = pointer_in(group, &live, cf.roll_style(), as_of)?;

    let head = pointer
        .checked_add(cf.offset() as usize)
        .filter(|&i| i < live.len())
        .ok_or_else(|| RollError::OffsetOutOfRange {
            root_symbol: group.root_symbol().to_string(),
            offset: cf.offset(),
            roll_pointer: pointer,
            available: live.len(),
            as_of,
        })?;

    Ok((live, head))
}

fn pointer_in(
    group: &RootSymbolGroup,
    live: &[&ContractRecord],
    roll_style: RollStyle,
    as_of: DateTime<Utc>,
) -> Result<usize, RollError> {
    roll_style
        .roll_pointer(live, as_of)
        .ok_or_else(|| RollError::NoCurrentContract {
            root_symbol: group.root_symbol().to_string(),
            as_of,
        })
}
