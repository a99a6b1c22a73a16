//! Unused-key guard.
//!
//! GREEN when:
//! - Unused keys are reported under Warn without error.
//! - Unused keys fail under Fail.
//! - Keys read by `ResolverConfig` are never flagged.
//! - Unused pointers come back sorted.
//! - A typo inside a `continuous_futures` entry is not hidden by its siblings.

use cfk_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const CLEAN_YAML: &str = r#"
contracts:
  path: roster.csv
  derive_auto_close: false
continuous_futures:
  - { root_symbol: FO, offset: 0, roll_style: calendar }
  - { root_symbol: FO, offset: 1, roll_style: calendar }
"#;

const NOISY_YAML: &str = r#"
contracts:
  path: roster.csv
  calendar: us_futures
strategy:
  name: spread
  legs: 2
"#;

#[test]
fn clean_config_passes_fail_policy() {
    let loaded = load_layered_yaml_from_strings(&[CLEAN_YAML]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}

#[test]
fn warn_policy_reports_without_error() {
    let loaded = load_layered_yaml_from_strings(&[NOISY_YAML]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/contracts/calendar".to_string(),
            "/strategy/legs".to_string(),
            "/strategy/name".to_string(),
        ]
    );
}

#[test]
fn fail_policy_rejects_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[NOISY_YAML]).unwrap();
    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "got: {msg}");
    assert!(msg.contains("/strategy/name"), "got: {msg}");
}

#[test]
fn misspelled_key_inside_a_descriptor_entry_is_flagged() {
    let yaml = r#"
contracts:
  path: roster.csv
continuous_futures:
  - { root_symbol: FO, offset: 0, roll_style: calendar }
  - { root_symbol: FO, offset: 0, roll_style: calendar, ofset: 1 }
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(report.unused_leaf_pointers, vec!["/continuous_futures/1/ofset".to_string()]);

    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    assert!(err.to_string().contains("/continuous_futures/1/ofset"), "got: {err}");
}
