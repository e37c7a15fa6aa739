//! Run documents loaded from disk.

use pnlsim::config::sample_yaml;
use pnlsim::prelude::*;
use tempfile::tempdir;

#[test]
fn sample_document_round_trips_through_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    std::fs::write(&path, sample_yaml()).unwrap();

    let config = RunConfig::load(&path).unwrap();
    let scenarios = config.resolve_scenarios().unwrap();
    assert_eq!(scenarios.len(), 3);
    assert_eq!(scenarios[0].name, "현재 계획");
    assert_eq!(scenarios[0].var_values, catalog().default_values());

    // overrides replace the preset value for the named variables only
    let conservative = &scenarios[2].var_values;
    assert!((contribution_of(conservative, VariableId::PriceIncrease) - 4_029_373_459.0).abs() < 1.0);
    assert!(
        (contribution_of(conservative, VariableId::StoreIncrease)
            - contribution_of(&scenarios[0].var_values, VariableId::StoreIncrease))
        .abs()
            < f64::EPSILON
    );
}

#[test]
fn json_documents_are_accepted() {
    let json = r#"{
        "scenarios": [
            { "name": "plan", "preset": "plan" },
            { "name": "custom", "var_values": { "overseas": 100000000 } }
        ]
    }"#;
    let config = RunConfig::from_json(json).unwrap();
    assert_eq!(config.scenarios.len(), 2);
    assert_eq!(config.export.file_prefix, "KL_시뮬레이션");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = RunConfig::load("/nonexistent/run.yaml").unwrap_err();
    assert!(matches!(err, PnlError::Io(_)));
}

#[test]
fn unknown_preset_is_rejected() {
    let yaml = "scenarios:\n  - name: a\n    preset: moonshot\n";
    let err = RunConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, PnlError::Config { .. }));
}

#[test]
fn unknown_variable_is_rejected_with_scenario_name() {
    let yaml = "scenarios:\n  - name: rogue\n    var_values:\n      tariffs: 5\n";
    let err = RunConfig::from_yaml(yaml).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("rogue"));
}

#[test]
fn duplicate_names_are_rejected() {
    let yaml = "scenarios:\n  - name: a\n  - name: a\n";
    assert!(RunConfig::from_yaml(yaml).is_err());
}

#[test]
fn empty_scenario_list_is_rejected() {
    let err = RunConfig::from_yaml("scenarios: []\n").unwrap_err();
    assert!(matches!(err, PnlError::Validation(_)));
}
