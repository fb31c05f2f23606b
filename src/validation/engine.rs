use crate::spec::{ArgSpec, ArgType, ModelSpec};
use crate::validation::{ArgsMap, ValidationEntry, ValidationReport};
use log::{debug, warn};
use serde_json::Value;
use std::path::Path;

pub const MSG_MISSING_VALUE: &str = "Input is required but has no value";
pub const MSG_NOT_A_NUMBER: &str = "Value does not represent a number";
pub const MSG_NOT_AN_INTEGER: &str = "Value does not represent an integer";
pub const MSG_NOT_A_BOOLEAN: &str = "Value does not represent a boolean";
pub const MSG_NOT_A_STRING: &str = "Value is not a string";
pub const MSG_FILE_NOT_FOUND: &str = "File not found";
pub const MSG_DIR_NOT_FOUND: &str = "Directory not found";

/// Validate a flat argument payload against a model's argument specification.
///
/// Produces a normalized report; data-shape problems inside the payload are
/// reported as entries, never raised. When `limit_to` is present only the
/// named parameters are checked. Argument keys absent from the spec are
/// tolerated and ignored.
pub fn validate_args(
    spec: &ModelSpec,
    args: &ArgsMap,
    limit_to: Option<&[String]>,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for key in args.keys() {
        if !spec.args.contains_key(key) {
            debug!("argument '{}' not declared by model '{}'", key, spec.module);
        }
    }

    for (key, arg_spec) in &spec.args {
        if let Some(limit) = limit_to {
            if !limit.iter().any(|l| l == key) {
                continue;
            }
        }

        match args.get(key) {
            None | Some(Value::Null) => {
                if arg_spec.is_required() {
                    report.push(ValidationEntry::single(key, MSG_MISSING_VALUE));
                }
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                if arg_spec.is_required() {
                    report.push(ValidationEntry::single(key, MSG_MISSING_VALUE));
                }
            }
            Some(value) => {
                if let Some(message) = check_value(arg_spec, value) {
                    report.push(ValidationEntry::single(key, message));
                }
            }
        }
    }

    report
}

/// Check one present, non-empty value against its spec.
/// Returns a violation message, or None if the value is acceptable.
fn check_value(arg_spec: &ArgSpec, value: &Value) -> Option<String> {
    match arg_spec.r#type {
        ArgType::Number | ArgType::Ratio | ArgType::Percent => {
            check_range(arg_spec, parse_number(value))
        }
        ArgType::Integer => match parse_number(value) {
            Some(n) if n.fract() == 0.0 => check_range(arg_spec, Some(n)),
            Some(_) => Some(MSG_NOT_AN_INTEGER.to_string()),
            None => Some(MSG_NOT_A_NUMBER.to_string()),
        },
        ArgType::Boolean => match value {
            Value::Bool(_) => None,
            Value::String(s)
                if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") =>
            {
                None
            }
            _ => Some(MSG_NOT_A_BOOLEAN.to_string()),
        },
        ArgType::FreestyleString => match value.as_str() {
            Some(s) => check_pattern(arg_spec, s),
            None => Some(MSG_NOT_A_STRING.to_string()),
        },
        ArgType::OptionString => match value.as_str() {
            Some(s) => check_option(arg_spec, s),
            None => Some(MSG_NOT_A_STRING.to_string()),
        },
        ArgType::File | ArgType::Raster | ArgType::Vector | ArgType::Csv => {
            match value.as_str() {
                Some(s) if Path::new(s).is_file() => None,
                Some(_) => Some(MSG_FILE_NOT_FOUND.to_string()),
                None => Some(MSG_NOT_A_STRING.to_string()),
            }
        }
        ArgType::Directory => match value.as_str() {
            Some(s) if Path::new(s).is_dir() => None,
            Some(_) => Some(MSG_DIR_NOT_FOUND.to_string()),
            None => Some(MSG_NOT_A_STRING.to_string()),
        },
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn check_range(arg_spec: &ArgSpec, number: Option<f64>) -> Option<String> {
    let number = match number {
        Some(n) => n,
        None => return Some(MSG_NOT_A_NUMBER.to_string()),
    };
    if let Some(min) = arg_spec.minimum {
        if number < min {
            return Some(format!("Value must be at least {}", min));
        }
    }
    if let Some(max) = arg_spec.maximum {
        if number > max {
            return Some(format!("Value must be at most {}", max));
        }
    }
    None
}

fn check_pattern(arg_spec: &ArgSpec, value: &str) -> Option<String> {
    let pattern = arg_spec.regexp.as_deref()?;
    match regex::Regex::new(pattern) {
        Ok(re) => {
            if re.is_match(value) {
                None
            } else {
                Some(format!("Value does not match pattern '{}'", pattern))
            }
        }
        Err(e) => {
            // A malformed pattern is a spec bug, not an argument problem
            warn!("unusable regex '{}' in argument spec: {}", pattern, e);
            None
        }
    }
}

fn check_option(arg_spec: &ArgSpec, value: &str) -> Option<String> {
    let options = arg_spec.options.as_ref()?;
    if options.contains_key(value) {
        None
    } else {
        let mut allowed: Vec<&str> = options.keys().map(String::as_str).collect();
        allowed.sort_unstable();
        Some(format!("Value must be one of: [{}]", allowed.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ArgSpec, ArgType, ModelSpec};
    use serde_json::json;

    fn test_spec() -> ModelSpec {
        ModelSpec::new("Test Model", "test_model")
            .with_arg(
                "workspace_dir",
                ArgSpec::new("Workspace", ArgType::Directory).required(),
            )
            .with_arg(
                "n",
                ArgSpec::new("N", ArgType::Number)
                    .required()
                    .with_numeric_range(Some(0.0), None),
            )
            .with_arg(
                "pool",
                ArgSpec::new("Pool", ArgType::OptionString)
                    .optional()
                    .with_options([("above", "aboveground"), ("below", "belowground")]),
            )
            .with_arg(
                "suffix",
                ArgSpec::new("Suffix", ArgType::FreestyleString)
                    .optional()
                    .with_pattern("^[a-z0-9_]*$"),
            )
    }

    fn args(value: serde_json::Value) -> ArgsMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_missing_required_reported() {
        let report = validate_args(&test_spec(), &args(json!({})), None);
        assert_eq!(report.len(), 2);
        for entry in &report.entries {
            assert_eq!(entry.message, MSG_MISSING_VALUE);
        }
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_args(
            &test_spec(),
            &args(json!({"workspace_dir": dir.path().to_str().unwrap(), "n": ""})),
            None,
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].keys, vec!["n"]);
    }

    #[test]
    fn test_valid_args_produce_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_args(
            &test_spec(),
            &args(json!({
                "workspace_dir": dir.path().to_str().unwrap(),
                "n": 5,
                "pool": "above",
                "suffix": "run_1"
            })),
            None,
        );
        assert!(report.is_valid(), "unexpected entries: {:?}", report.entries);
    }

    #[test]
    fn test_number_from_string_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_args(
            &test_spec(),
            &args(json!({"workspace_dir": dir.path().to_str().unwrap(), "n": "3.5"})),
            None,
        );
        assert!(report.is_valid());
    }

    #[test]
    fn test_range_violation() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_args(
            &test_spec(),
            &args(json!({"workspace_dir": dir.path().to_str().unwrap(), "n": -1})),
            None,
        );
        assert_eq!(report.len(), 1);
        assert!(report.entries[0].message.contains("at least"));
    }

    #[test]
    fn test_bad_option_lists_allowed_values() {
        let report = validate_args(
            &test_spec(),
            &args(json!({"pool": "sideways"})),
            Some(&["pool".to_string()]),
        );
        assert_eq!(report.len(), 1);
        assert!(report.entries[0].message.contains("above"));
        assert!(report.entries[0].message.contains("below"));
    }

    #[test]
    fn test_limit_to_scopes_validation() {
        // workspace_dir and n are both missing, but only n is in scope
        let report = validate_args(&test_spec(), &args(json!({})), Some(&["n".to_string()]));
        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].keys, vec!["n"]);
    }

    #[test]
    fn test_pattern_violation() {
        let report = validate_args(
            &test_spec(),
            &args(json!({"suffix": "Run 1!"})),
            Some(&["suffix".to_string()]),
        );
        assert_eq!(report.len(), 1);
        assert!(report.entries[0].message.contains("pattern"));
    }

    #[test]
    fn test_missing_file_reported() {
        let spec = ModelSpec::new("M", "m").with_arg(
            "table",
            ArgSpec::new("Table", ArgType::Csv).required(),
        );
        let report = validate_args(&spec, &args(json!({"table": "/no/such/file.csv"})), None);
        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].message, MSG_FILE_NOT_FOUND);
    }

    #[test]
    fn test_undeclared_keys_tolerated() {
        let report = validate_args(
            &test_spec(),
            &args(json!({"mystery": 42})),
            Some(&["mystery".to_string()]),
        );
        assert!(report.is_valid());
    }
}
