//! Configured continuous futures go through the registry's validation.

use cfk_config::{load_layered_yaml_from_strings, ResolverConfig};
use cfk_roll::{ContinuousFutureRegistry, RollStyle};

#[test]
fn configured_descriptors_are_interned_in_order() {
    let yaml = r#"
continuous_futures:
  - { root_symbol: FO, offset: 1, roll_style: calendar }
  - { root_symbol: FO, offset: 0, roll_style: Calendar }
  - { root_symbol: FO, offset: 1, roll_style: calendar }
"#;
    let cfg = ResolverConfig::from_loaded(&load_layered_yaml_from_strings(&[yaml]).unwrap()).unwrap();
    let mut reg = ContinuousFutureRegistry::new();
    let cfs = cfg.register_all(&mut reg).unwrap();

    assert_eq!(cfs.len(), 3);
    assert_eq!(cfs[0].offset(), 1);
    assert_eq!(cfs[1].offset(), 0);
    assert_eq!(cfs[1].roll_style(), RollStyle::Calendar);
    // Duplicate entries intern to the same descriptor.
    assert_eq!(cfs[0], cfs[2]);
    assert_eq!(reg.len(), 2);
}

#[test]
fn negative_offset_names_the_entry() {
    let yaml = r#"
continuous_futures:
  - { root_symbol: FO, offset: 0, roll_style: calendar }
  - { root_symbol: FO, offset: -1, roll_style: calendar }
"#;
    let cfg = ResolverConfig::from_loaded(&load_layered_yaml_from_strings(&[yaml]).unwrap()).unwrap();
    let mut reg = ContinuousFutureRegistry::new();
    let err = cfg.register_all(&mut reg).unwrap_err();
    assert!(format!("{err:#}").contains("continuous_futures[1]"), "got: {err:#}");
}

#[test]
fn unknown_roll_style_is_rejected() {
    let yaml = "continuous_futures:\n  - { root_symbol: FO, offset: 0, roll_style: volume }\n";
    let cfg = ResolverConfig::from_loaded(&load_layered_yaml_from_strings(&[yaml]).unwrap()).unwrap();
    assert!(cfg.register_all(&mut ContinuousFutureRegistry::new()).is_err());
}
