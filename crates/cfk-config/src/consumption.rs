//! Unused-key guard.
//!
//! Consumed pointers are JSON Pointer patterns matched token by token
//! against each leaf. A leaf is consumed when a pattern's tokens are a prefix
//! of the leaf's tokens. `*` matches exactly one array index. Every other leaf
//! is unused, and callers choose whether unused keys warn or fail.
//!
//! - "/contracts/path" consumes "/contracts/path"
//! - "/continuous_futures/*/offset" consumes "/continuous_futures/3/offset"
//!   but not "/continuous_futures/3/ofset"

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One entry per field `ResolverConfig` reads. Never list a whole section.
static CONSUMED: &[&str] = &[
    "/contracts/derive_auto_close",
    "/contracts/path",
    "/continuous_futures/*/offset",
    "/continuous_futures/*/roll_style",
    "/continuous_futures/*/root_symbol",
];

pub fn consumed_pointers() -> &'static [&'static str] {
    CONSUMED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub consumed_patterns: Vec<String>,
    /// Sorted.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Under `Warn` this always returns the report (logging each unused leaf);
/// under `Fail` it errors when any leaf is unused.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !CONSUMED.iter().any(|pattern| pattern_consumes(pattern, leaf)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_patterns: CONSUMED.iter().map(|p| p.to_string()).collect(),
        unused_leaf_pointers: unused,
    };

    if report.is_clean() {
        return Ok(report);
    }

    match policy {
        UnusedKeyPolicy::Fail => bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
             Remove them or update the consumed registry. First few: {:?}",
            report.unused_leaf_pointers.len(),
            &report.unused_leaf_pointers[..report.unused_leaf_pointers.len().min(12)]
        ),
        UnusedKeyPolicy::Warn => {
            for leaf in &report.unused_leaf_pointers {
                warn!(leaf = %leaf, "unused config key");
            }
        }
    }

    Ok(report)
}

fn pattern_consumes(pattern: &str, leaf: &str) -> bool {
    let mut leaf_tokens = leaf.split('/').skip(1);
    pattern.split('/').skip(1).all(|p| match leaf_tokens.next() {
        Some(l) if p == "*" => l.parse::<usize>().is_ok(),
        Some(l) => l == p,
        None => false,
    })
}

/// Scalar leaves only; empty objects and arrays contribute nothing.
fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map {
                let token = k.replace('~', "~0").replace('/', "~1");
                collect_leaf_pointers(vv, &format!("{prefix}/{token}"), out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                collect_leaf_pointers(vv, &format!("{prefix}/{i}"), out);
            }
        }
        _ if prefix.is_empty() => {}
        _ => out.push(prefix.to_string()),
    }
}
