//! `cfk resolve`: every configured continuous future at one instant.
//!
//! Output starts with the config and roster hashes, so a result can be
//! traced back to the exact inputs that produced it.

use anyhow::{Context, Result};
use cfk_config::{
    load_layered_yaml, report_unused_keys, sha256_hex, ResolverConfig, UnusedKeyPolicy,
};
use cfk_roll::{ChainAccessor, ContinuousFutureRegistry};
use chrono::{DateTime, Utc};
use std::fs;
use tracing::info;

pub fn run(
    config_paths: &[String],
    contracts_flag: Option<String>,
    as_of: DateTime<Utc>,
    strict: bool,
) -> Result<()> {
    let path_refs: Vec<&str> = config_paths.iter().map(String::as_str).collect();
    let loaded = load_layered_yaml(&path_refs)?;

    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    report_unused_keys(&loaded.config_json, policy)?;

    let cfg = ResolverConfig::from_loaded(&loaded)?;

    // Flag beats config beats environment. A relative config path is already
    // anchored at the last config file's directory.
    let contracts = super::contracts_path(contracts_flag.or_else(|| cfg.contracts.path.clone()))?;
    let roster_hash = sha256_hex(
        &fs::read(&contracts).with_context(|| format!("failed to read contract roster: {contracts}"))?,
    );
    let store = super::load_store(&contracts, cfg.contracts.derive_auto_close)?;

    let mut registry = ContinuousFutureRegistry::new();
    let cfs = cfg.register_all(&mut registry)?;
    info!(
        config_hash = %loaded.config_hash,
        roster_hash = %roster_hash,
        continuous_futures = cfs.len(),
        "resolver config loaded"
    );

    let data = ChainAccessor::new(&store, &registry);

    println!("config_hash={}", loaded.config_hash);
    println!("roster_hash={roster_hash}");
    println!("as_of={}", as_of.to_rfc3339());
    println!("continuous_futures={}", cfs.len());
    for cf in &cfs {
        let chain = data
            .current_chain(cf, as_of)
            .with_context(|| format!("resolving {cf}"))?;
        println!("current[{cf}]={}", chain[0].symbol);
        println!("chain_len[{cf}]={}", chain.len());
    }
    Ok(())
}
