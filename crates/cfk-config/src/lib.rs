//! cfk-config
//!
//! Layered YAML configuration for the roll resolver.
//!
//! - Documents merge in order: earlier layers are the base, later layers
//!   override (objects merge key-by-key, everything else is replaced).
//! - The merged tree is serialized to canonical JSON (sorted keys, compact)
//!   and hashed with SHA-256, so the same effective config always yields the
//!   same `config_hash` regardless of key order in the source files.
//!   `cfk resolve` prints it next to the roster hash to tag its output.
//! - [`report_unused_keys`] flags leaves nothing reads.
//! - [`ResolverConfig::from_loaded`] extracts the typed view.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

mod consumption;
mod resolver_config;

pub use consumption::{consumed_pointers, report_unused_keys, UnusedKeyPolicy, UnusedKeyReport};
pub use resolver_config::{ContinuousFutureSpec, ContractsSection, ResolverConfig};

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
    /// Directory of the last file layer; `None` for in-memory layers.
    pub base_dir: Option<PathBuf>,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}")))
        .collect::<Result<Vec<String>>>()?;

    let mut loaded = load_layered_yaml_from_strings(&docs.iter().map(String::as_str).collect::<Vec<_>>())?;
    loaded.base_dir = paths.last().map(|p| match Path::new(p).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    });
    Ok(loaded)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        let layer = serde_json::to_value(layer).context("yaml->json conversion failed")?;
        // An empty document parses as null; treat it as "no overrides".
        if !layer.is_null() {
            overlay(&mut merged, layer);
        }
    }

    // serde_json's default Map is ordered by key, so this is canonical.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    Ok(LoadedConfig {
        config_hash: sha256_hex(canonical_json.as_bytes()),
        canonical_json,
        config_json: merged,
        base_dir: None,
    })
}

/// Lowercase hex SHA-256.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (k, v) in layer_map {
                match base_map.get_mut(&k) {
                    Some(slot) => overlay(slot, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}
