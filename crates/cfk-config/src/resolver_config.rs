use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use cfk_roll::{ContinuousFuture, ContinuousFutureRegistry};

use crate::LoadedConfig;

/// Typed view over the keys listed in [`crate::consumed_pointers`].
///
/// ```yaml
/// contracts:
///   path: data/fo_roster.csv
///   derive_auto_close: true
/// continuous_futures:
///   - { root_symbol: FO, offset: 0, roll_style: calendar }
///   - { root_symbol: FO, offset: 1, roll_style: calendar }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub contracts: ContractsSection,
    #[serde(default)]
    pub continuous_futures: Vec<ContinuousFutureSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractsSection {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_true")]
    pub derive_auto_close: bool,
}

impl Default for ContractsSection {
    fn default() -> Self {
        Self {
            path: None,
            derive_auto_close: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Raw descriptor parameters. Kept untyped (signed offset, free-form style)
/// so validation happens in one place: the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContinuousFutureSpec {
    pub root_symbol: String,
    pub offset: i64,
    pub roll_style: String,
}

impl ResolverConfig {
    /// Relative `contracts.path` values are joined onto
    /// [`LoadedConfig::base_dir`] when the config came from files.
    pub fn from_loaded(loaded: &LoadedConfig) -> Result<Self> {
        let mut cfg: Self =
            serde_json::from_value(loaded.config_json.clone()).context("invalid resolver config")?;
        if let (Some(dir), Some(path)) = (&loaded.base_dir, cfg.contracts.path.as_mut()) {
            if Path::new(path.as_str()).is_relative() {
                *path = dir.join(path.as_str()).to_string_lossy().into_owned();
            }
        }
        Ok(cfg)
    }

    /// Create every configured descriptor in `registry`, in config order.
    pub fn register_all(&self, registry: &mut ContinuousFutureRegistry) -> Result<Vec<ContinuousFuture>> {
        self.continuous_futures
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                registry
                    .create_continuous_future(&spec.root_symbol, spec.offset, &spec.roll_style)
                    .with_context(|| format!("continuous_futures[{i}]"))
            })
            .collect()
    }
}
