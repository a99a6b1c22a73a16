//! Root symbol groups and the contract store that owns them.
//!
//! A [`RootSymbolGroup`] is the read-only, chronologically ordered roster of
//! one root symbol. A [`ContractStore`] maps root symbols to groups and is the
//! single place where ingested records are validated. Nothing here mutates
//! after construction, so both types can be shared freely across threads.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::error::ContractError;
use crate::record::ContractRecord;

// ---------------------------------------------------------------------------
// RootSymbolGroup
// ---------------------------------------------------------------------------

/// All contracts sharing a root symbol, sorted by
/// [`ContractRecord::chain_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSymbolGroup {
    root_symbol: String,
    contracts: Vec<ContractRecord>,
}

impl RootSymbolGroup {
    /// Build a group from records that must all carry `root_symbol`.
    ///
    /// Every record is validated. A record filed under a different root is
    /// reported as malformed.
    pub fn new(
        root_symbol: impl Into<String>,
        records: Vec<ContractRecord>,
    ) -> Result<Self, ContractError> {
        let root_symbol = root_symbol.into();
        let mut seen = BTreeSet::new();
        for r in &records {
            r.validate()?;
            if r.root_symbol != root_symbol {
                return Err(ContractError::malformed(
                    &r.symbol,
                    format!(
                        "root_symbol '{}' does not match group '{}'",
                        r.root_symbol, root_symbol
                    ),
                ));
            }
            if !seen.insert(r.symbol.as_str()) {
                return Err(ContractError::malformed(
                    &r.symbol,
                    "duplicate symbol in contract roster",
                ));
            }
        }

        let mut contracts = records;
        contracts.sort_by(|a, b| a.chain_order(b));

        Ok(Self {
            root_symbol,
            contracts,
        })
    }

    pub fn root_symbol(&self) -> &str {
        &self.root_symbol
    }

    /// Contracts in ascending chain order.
    pub fn contracts(&self) -> &[ContractRecord] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ContractStore
// ---------------------------------------------------------------------------

/// Root symbol → [`RootSymbolGroup`] for every ingested contract.
///
/// Root symbols iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractStore {
    groups: BTreeMap<String, RootSymbolGroup>,
    /// symbol → root symbol
    symbol_roots: BTreeMap<String, String>,
}

impl ContractStore {
    /// Validate and group a batch of records.
    ///
    /// The batch is all-or-nothing: the first malformed record (or repeated
    /// symbol, across all roots) fails the whole build.
    pub fn from_records<I>(records: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = ContractRecord>,
    {
        let mut by_root: BTreeMap<String, Vec<ContractRecord>> = BTreeMap::new();
        let mut symbol_roots: BTreeMap<String, String> = BTreeMap::new();

        for r in records {
            r.validate()?;
            if symbol_roots
                .insert(r.symbol.clone(), r.root_symbol.clone())
                .is_some()
            {
                return Err(ContractError::malformed(
                    &r.symbol,
                    "duplicate symbol in contract roster",
                ));
            }
            by_root.entry(r.root_symbol.clone()).or_default().push(r);
        }

        let mut groups = BTreeMap::new();
        for (root, recs) in by_root {
            let group = RootSymbolGroup::new(root.clone(), recs)?;
            groups.insert(root, group);
        }

        info!(
            roots = groups.len(),
            contracts = symbol_roots.len(),
            "contract store built"
        );

        Ok(Self {
            groups,
            symbol_roots,
        })
    }

    /// The group for `root_symbol`.
    pub fn group(&self, root_symbol: &str) -> Result<&RootSymbolGroup, ContractError> {
        self.groups
            .get(root_symbol)
            .ok_or_else(|| ContractError::UnknownRootSymbol {
                root_symbol: root_symbol.to_string(),
            })
    }

    /// Look up a single contract by its exchange symbol.
    pub fn contract(&self, symbol: &str) -> Result<&ContractRecord, ContractError> {
        let unknown = || ContractError::UnknownSymbol {
            symbol: symbol.to_string(),
        };
        let root = self.symbol_roots.get(symbol).ok_or_else(unknown)?;
        self.groups
            .get(root)
            .and_then(|g| g.contracts().iter().find(|c| c.symbol == symbol))
            .ok_or_else(unknown)
    }

    pub fn root_symbols(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of contracts across all roots.
    pub fn len(&self) -> usize {
        self.symbol_roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_roots.is_empty()
    }
}
