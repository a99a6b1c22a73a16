//! Continuous future registry: create, then retrieve by identity.
//!
//! The registry is the interning table for descriptors. Creation is
//! idempotent: asking twice for the same `(root_symbol, offset, roll_style)`
//! returns equal descriptors carrying the same sid, and the table holds one
//! entry for it.
//!
//! # Thread-safety
//! Interning takes `&mut self`. Share a populated registry behind `&` (or an
//! `Arc`) for lookups; wrap it in a lock if descriptors are created
//! concurrently.

use std::collections::BTreeMap;

use tracing::info;

use crate::descriptor::{ContinuousFuture, ContinuousFutureSid};
use crate::error::RollError;

#[derive(Debug, Clone, Default)]
pub struct ContinuousFutureRegistry {
    by_sid: BTreeMap<ContinuousFutureSid, ContinuousFuture>,
}

impl ContinuousFutureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw parameters, intern the descriptor and return it.
    ///
    /// # Errors
    /// [`RollError::InvalidDescriptorParameters`] for a negative offset, an
    /// unsupported roll style, or an empty root symbol. Nothing is interned
    /// on failure.
    pub fn create_continuous_future(
        &mut self,
        root_symbol: &str,
        offset: i64,
        roll_style: &str,
    ) -> Result<ContinuousFuture, RollError> {
        let cf = ContinuousFuture::from_parts(root_symbol, offset, roll_style)?;
        Ok(self.intern(cf))
    }

    /// Intern an already-built descriptor.
    pub fn intern(&mut self, cf: ContinuousFuture) -> ContinuousFuture {
        self.by_sid
            .entry(cf.sid())
            .or_insert_with(|| {
                info!(sid = %cf.sid(), continuous_future = %cf, "continuous future interned");
                cf
            })
            .clone()
    }

    pub fn retrieve(&self, sid: ContinuousFutureSid) -> Result<&ContinuousFuture, RollError> {
        self.by_sid.get(&sid).ok_or(RollError::UnknownSid { sid })
    }

    /// Interned descriptors, ordered by sid.
    pub fn iter(&self) -> impl Iterator<Item = &ContinuousFuture> {
        self.by_sid.values()
    }

    pub fn len(&self) -> usize {
        self.by_sid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sid.is_empty()
    }
}
