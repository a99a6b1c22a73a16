//! Per-step query surface for a running simulation.
//!
//! [`ChainAccessor`] resolves a descriptor's root symbol against a
//! [`ContractStore`] and delegates to the resolver. It caches nothing: the
//! caller advances `as_of` between calls and every call recomputes.

use cfk_contracts::{ContractRecord, ContractStore, RootSymbolGroup};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::descriptor::{ContinuousFuture, ContinuousFutureSid};
use crate::error::RollError;
use crate::registry::ContinuousFutureRegistry;
use crate::resolver;
use crate::schedule::{self, RollSegment};

#[derive(Debug, Clone, Copy)]
pub struct ChainAccessor<'a> {
    store: &'a ContractStore,
    registry: &'a ContinuousFutureRegistry,
}

impl<'a> ChainAccessor<'a> {
    pub fn new(store: &'a ContractStore, registry: &'a ContinuousFutureRegistry) -> Self {
        Self { store, registry }
    }

    pub fn current_contract(
        &self,
        cf: &ContinuousFuture,
        as_of: DateTime<Utc>,
    ) -> Result<&'a ContractRecord, RollError> {
        let group = self.group_for(cf)?;
        let contract = resolver::current_contract(group, cf, as_of)?;
        debug!(
            continuous_future = %cf,
            as_of = %as_of.to_rfc3339(),
            contract = %contract.symbol,
            "current contract resolved"
        );
        Ok(contract)
    }

    pub fn current_chain(
        &self,
        cf: &ContinuousFuture,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<&'a ContractRecord>, RollError> {
        let group = self.group_for(cf)?;
        let chain = resolver::current_chain(group, cf, as_of)?;
        debug!(
            continuous_future = %cf,
            as_of = %as_of.to_rfc3339(),
            head = %chain[0].symbol,
            len = chain.len(),
            "current chain resolved"
        );
        Ok(chain)
    }

    pub fn current_contract_by_sid(
        &self,
        sid: ContinuousFutureSid,
        as_of: DateTime<Utc>,
    ) -> Result<&'a ContractRecord, RollError> {
        let cf = self.registry.retrieve(sid)?;
        self.current_contract(cf, as_of)
    }

    pub fn current_chain_by_sid(
        &self,
        sid: ContinuousFutureSid,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<&'a ContractRecord>, RollError> {
        let cf = self.registry.retrieve(sid)?;
        self.current_chain(cf, as_of)
    }

    /// See [`schedule::roll_schedule`].
    pub fn roll_schedule(
        &self,
        cf: &ContinuousFuture,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RollSegment<'a>>, RollError> {
        let group = self.group_for(cf)?;
        schedule::roll_schedule(group, cf, start, end)
    }

    fn group_for(&self, cf: &ContinuousFuture) -> Result<&'a RootSymbolGroup, RollError> {
        Ok(self.store.group(cf.root_symbol())?)
    }
}
