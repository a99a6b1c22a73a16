//! Single-descriptor queries: `current`, `chain`, `schedule`.
//!
//! Each command builds a one-entry registry, resolves through
//! [`ChainAccessor`] and prints `key=value` lines on stdout.

use anyhow::Result;
use cfk_contracts::ContractStore;
use cfk_roll::{ChainAccessor, ContinuousFuture, ContinuousFutureRegistry, Resolution};
use chrono::{DateTime, Utc};

/// Descriptor flags shared by every query command.
#[derive(Debug, Clone)]
pub struct DescriptorArgs {
    pub root: String,
    pub offset: i64,
    pub roll_style: String,
}

struct Query {
    store: ContractStore,
    registry: ContinuousFutureRegistry,
    cf: ContinuousFuture,
}

impl Query {
    fn open(contracts: &str, d: &DescriptorArgs) -> Result<Self> {
        let store = super::load_store(contracts, true)?;
        let mut registry = ContinuousFutureRegistry::new();
        let cf = registry.create_continuous_future(&d.root, d.offset, &d.roll_style)?;
        Ok(Self { store, registry, cf })
    }

    fn accessor(&self) -> ChainAccessor<'_> {
        ChainAccessor::new(&self.store, &self.registry)
    }

    fn print_header(&self) {
        println!("continuous_future={}", self.cf);
        println!("sid={}", self.cf.sid());
    }
}

pub fn current(contracts: &str, d: &DescriptorArgs, as_of: DateTime<Utc>) -> Result<()> {
    let q = Query::open(contracts, d)?;
    let contract = q.accessor().current_contract_by_sid(q.cf.sid(), as_of)?;

    q.print_header();
    println!("as_of={}", as_of.to_rfc3339());
    println!("contract={}", contract.symbol);
    println!("auto_close_date={}", contract.auto_close_date.to_rfc3339());
    Ok(())
}

pub fn chain(contracts: &str, d: &DescriptorArgs, as_of: DateTime<Utc>) -> Result<()> {
    let q = Query::open(contracts, d)?;
    let chain = q.accessor().current_chain_by_sid(q.cf.sid(), as_of)?;

    q.print_header();
    println!("as_of={}", as_of.to_rfc3339());
    println!("chain_len={}", chain.len());
    for (i, c) in chain.iter().enumerate() {
        println!("chain[{i}]={}", c.symbol);
    }
    Ok(())
}

pub fn schedule(
    contracts: &str,
    d: &DescriptorArgs,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<()> {
    let q = Query::open(contracts, d)?;
    let segments = q.accessor().roll_schedule(&q.cf, from, to)?;

    q.print_header();
    println!("segments={}", segments.len());
    for (i, seg) in segments.iter().enumerate() {
        let until = seg
            .active_until
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "open".to_string());
        let head = match &seg.resolution {
            Resolution::Resolved(c) => c.symbol.clone(),
            Resolution::Unresolved(_) => "unresolved".to_string(),
        };
        println!(
            "segment[{i}]={head} active_from={} active_until={until}",
            seg.active_from.to_rfc3339(),
        );
        if let Resolution::Unresolved(e) = &seg.resolution {
            println!("segment[{i}].error={e}");
        }
    }
    Ok(())
}
