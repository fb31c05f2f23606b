use modelstack::{datastack, ArgsMap, DatastackType, FacadeError};
use serde_json::json;
use std::fs;

fn args(value: serde_json::Value) -> ArgsMap {
    value.as_object().unwrap().clone()
}

#[test]
fn test_round_trip_preserves_args_and_model_name() {
    // Scenario: write {"workspace_dir": <ws>, "n": 5} for "carbon" into the
    // workspace itself, then read it back
    let ws = tempfile::tempdir().unwrap();
    let ws_str = ws.path().to_str().unwrap();
    let destination = ws.path().join("params.json");
    let original = args(json!({"workspace_dir": ws_str, "n": 5}));

    datastack::write_parameter_set(&original, "carbon", &destination, false).unwrap();
    let record = datastack::read_datastack(&destination).unwrap();

    assert_eq!(record.stack_type, DatastackType::ParameterSet);
    assert_eq!(record.model_name, "carbon");
    assert_eq!(record.args, original);
    assert_eq!(record.invest_version, modelstack::VERSION);
}

#[test]
fn test_relativization_round_trip() {
    // A path under the destination's directory tree is stored relative and
    // resolves back to the original absolute path on read
    let ws = tempfile::tempdir().unwrap();
    fs::create_dir(ws.path().join("inputs")).unwrap();
    let dem = ws.path().join("inputs").join("dem.tif");
    fs::write(&dem, b"raster").unwrap();
    let destination = ws.path().join("params.json");
    let original = args(json!({"dem_path": dem.to_str().unwrap()}));

    datastack::write_parameter_set(&original, "delineateit", &destination, true).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
    assert_eq!(raw["args"]["dem_path"], json!("inputs/dem.tif"));

    let record = datastack::read_datastack(&destination).unwrap();
    assert_eq!(record.args, original);
}

#[test]
fn test_written_artifact_embeds_metadata() {
    let ws = tempfile::tempdir().unwrap();
    let destination = ws.path().join("params.json");
    datastack::write_parameter_set(&args(json!({"n": 1})), "pollination", &destination, false)
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
    assert_eq!(raw["format_version"], json!(1));
    assert_eq!(raw["model_name"], json!("pollination"));
    assert_eq!(raw["invest_version"], json!(modelstack::VERSION));
}

#[test]
fn test_read_failures_are_parse_failures() {
    let ws = tempfile::tempdir().unwrap();

    let missing = ws.path().join("absent.json");
    assert!(matches!(
        datastack::read_datastack(&missing).unwrap_err(),
        FacadeError::DatastackParse { .. }
    ));

    let garbled = ws.path().join("garbled.json");
    fs::write(&garbled, b"{\"model_name\": ").unwrap();
    assert!(matches!(
        datastack::read_datastack(&garbled).unwrap_err(),
        FacadeError::DatastackParse { .. }
    ));
}

#[test]
fn test_script_generation_scenario() {
    // Scenario: model "carbon", module reference "carbon", args {"n": 5}
    let ws = tempfile::tempdir().unwrap();
    let destination = ws.path().join("execute_carbon.py");
    datastack::write_python_script(&args(json!({"n": 5})), "carbon", "carbon", &destination)
        .unwrap();

    let script = fs::read_to_string(&destination).unwrap();
    // The embedded literal is exactly the dict {'n': 5}
    assert!(script.contains("args = {\n    'n': 5,\n}"));
    assert!(script.contains("import carbon"));
    assert!(script.contains("carbon.execute(args)"));
    assert!(script.starts_with("# coding=UTF-8"));
}

#[test]
fn test_script_write_failure_leaves_nothing() {
    let ws = tempfile::tempdir().unwrap();
    let destination = ws.path().join("no_dir").join("script.py");
    let err = datastack::write_python_script(&args(json!({})), "carbon", "carbon", &destination)
        .unwrap_err();
    assert!(matches!(err, FacadeError::Persist { .. }));
    assert!(!destination.exists());
}
