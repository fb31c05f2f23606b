use modelstack::{registry, validation, ArgsMap, FacadeError};
use serde_json::json;
use std::fs;

fn args(value: serde_json::Value) -> ArgsMap {
    value.as_object().unwrap().clone()
}

/// A complete, individually-valid carbon argument set backed by real files
fn valid_carbon_args(dir: &std::path::Path) -> ArgsMap {
    let lulc = dir.join("lulc.tif");
    let pools = dir.join("pools.csv");
    fs::write(&lulc, b"raster").unwrap();
    fs::write(&pools, b"lucode,c_above\n1,120\n").unwrap();
    args(json!({
        "workspace_dir": dir.to_str().unwrap(),
        "lulc_cur_path": lulc.to_str().unwrap(),
        "carbon_pools_path": pools.to_str().unwrap(),
    }))
}

#[test]
fn test_complete_valid_args_produce_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let definition = registry::load("carbon").unwrap();
    let report = definition.validate(&valid_carbon_args(dir.path()), None);
    assert!(report.is_valid(), "unexpected entries: {:?}", report.entries);
}

#[test]
fn test_missing_required_reported_not_raised() {
    let definition = registry::load("carbon").unwrap();
    let report = definition.validate(&args(json!({})), None);
    assert!(!report.is_valid());
    let reported: Vec<&str> = report
        .entries
        .iter()
        .flat_map(|entry| entry.keys.iter().map(String::as_str))
        .collect();
    assert!(reported.contains(&"workspace_dir"));
    assert!(reported.contains(&"lulc_cur_path"));
    assert!(reported.contains(&"carbon_pools_path"));
}

#[test]
fn test_limit_to_never_reports_unrelated_parameters() {
    // Everything is missing, but validation is scoped to results_suffix
    let definition = registry::load("carbon").unwrap();
    let report = definition.validate(&args(json!({})), Some(&["results_suffix".to_string()]));
    assert!(report.is_valid());

    // Scoped to one missing required parameter: only that one is reported
    let report = definition.validate(&args(json!({})), Some(&["workspace_dir".to_string()]));
    assert_eq!(report.len(), 1);
    assert_eq!(report.entries[0].keys, vec!["workspace_dir"]);
}

#[test]
fn test_cross_field_rule_visible_under_limit_to() {
    let definition = registry::load("carbon").unwrap();
    let payload = args(json!({"calc_sequestration": true}));

    // Scoped to the referenced parameter: the joint rule stays visible
    let report = definition.validate(&payload, Some(&["lulc_fut_path".to_string()]));
    assert!(report
        .entries
        .iter()
        .any(|entry| entry.keys.contains(&"lulc_fut_path".to_string())));

    // Scoped to an unrelated parameter: the joint rule is filtered out
    let report = definition.validate(&payload, Some(&["results_suffix".to_string()]));
    assert!(report.is_valid());
}

#[test]
fn test_partial_argument_sets_are_tolerated() {
    // A strict subset of declared keys validates without shape errors;
    // absent optional parameters are not violations
    let dir = tempfile::tempdir().unwrap();
    let definition = registry::load("carbon").unwrap();
    let report = definition.validate(
        &args(json!({"workspace_dir": dir.path().to_str().unwrap()})),
        Some(&["workspace_dir".to_string(), "results_suffix".to_string()]),
    );
    assert!(report.is_valid());
}

#[test]
fn test_validate_module_adapter() {
    let report = validation::validate_module(
        "carbon",
        &args(json!({})),
        Some(&["workspace_dir".to_string()]),
    )
    .unwrap();
    assert_eq!(report.len(), 1);

    let err = validation::validate_module("no.such.module", &args(json!({})), None).unwrap_err();
    assert!(matches!(err, FacadeError::ModelLoad(_)));
}

#[test]
fn test_invalid_values_reported_per_parameter() {
    let definition = registry::load("hra").unwrap();
    let report = definition.validate(
        &args(json!({"resolution": "coarse", "risk_eq": "euclidean"})),
        Some(&["resolution".to_string(), "risk_eq".to_string()]),
    );
    assert_eq!(report.len(), 1);
    assert_eq!(report.entries[0].keys, vec!["resolution"]);
}
