//! cfk-roll
//!
//! Continuous futures: descriptors, their interning registry, and the roll
//! resolver that maps (descriptor, as_of) to a concrete contract and its
//! forward chain.
//!
//! Contract:
//! - Resolution is a pure function of (root symbol group, descriptor, as_of).
//! - A contract is excluded from the chain from the instant `as_of` reaches
//!   its `auto_close_date` (inclusive), and while `as_of < start_date`.
//! - Errors are surfaced verbatim; no stale or clamped contract is ever
//!   returned.
//!
//! No IO, no wall-clock, no locking. The caller supplies `as_of`.

mod accessor;
mod descriptor;
mod error;
mod policy;
mod registry;
pub mod resolver;
mod schedule;

pub use accessor::ChainAccessor;
pub use descriptor::{ContinuousFuture, ContinuousFutureSid};
pub use error::RollError;
pub use policy::RollStyle;
pub use registry::ContinuousFutureRegistry;
pub use resolver::{current_chain, current_contract, roll_pointer};
pub use schedule::{roll_schedule, Resolution, RollSegment};
