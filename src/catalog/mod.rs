//! Built-in model definitions.
//!
//! Every model the registry can name is statically registered here; the
//! loader resolves module paths through [`instantiate`] instead of any
//! dynamic import mechanism.

mod carbon;
mod delineateit;
mod habitat_quality;
mod hra;
mod pollination;
mod seasonal_water_yield;

use crate::registry::ModelDefinition;
use crate::validation::ArgsMap;
use std::sync::Arc;

type Factory = fn() -> Arc<dyn ModelDefinition>;

const FACTORIES: &[(&str, Factory)] = &[
    ("carbon", carbon::definition),
    ("delineateit", delineateit::definition),
    ("habitat_quality", habitat_quality::definition),
    ("hra", hra::definition),
    ("pollination", pollination::definition),
    (
        "seasonal_water_yield.seasonal_water_yield",
        seasonal_water_yield::definition,
    ),
];

/// Construct the definition registered under `module_path`, if any
pub fn instantiate(module_path: &str) -> Option<Arc<dyn ModelDefinition>> {
    FACTORIES
        .iter()
        .find(|(path, _)| *path == module_path)
        .map(|(_, factory)| factory())
}

/// Whether the argument is present with a usable (non-null, non-blank) value
pub(crate) fn has_value(args: &ArgsMap, key: &str) -> bool {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Interpret a boolean-typed argument, accepting the string forms the
/// validation engine accepts
pub(crate) fn bool_value(args: &ArgsMap, key: &str) -> bool {
    match args.get(key) {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instantiate_known_module() {
        assert!(instantiate("carbon").is_some());
        assert!(instantiate("seasonal_water_yield.seasonal_water_yield").is_some());
    }

    #[test]
    fn test_instantiate_unknown_module() {
        assert!(instantiate("carbon.carbon").is_none());
        assert!(instantiate("").is_none());
    }

    #[test]
    fn test_has_value() {
        let args = json!({"a": "x", "b": "", "c": null, "d": 0})
            .as_object()
            .unwrap()
            .clone();
        assert!(has_value(&args, "a"));
        assert!(!has_value(&args, "b"));
        assert!(!has_value(&args, "c"));
        assert!(has_value(&args, "d"));
        assert!(!has_value(&args, "e"));
    }
}
