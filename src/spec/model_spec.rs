use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a single model argument.
///
/// Mirrors the argument vocabulary used by the model catalog: plain scalars,
/// constrained strings, and the file-backed geospatial types. Path-backed
/// types matter to the datastack codec, which relativizes their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
    Number,
    Integer,
    Ratio,
    Percent,
    Boolean,
    FreestyleString,
    OptionString,
    File,
    Directory,
    Raster,
    Vector,
    Csv,
}

impl ArgType {
    /// Whether values of this type name a location on the file system
    pub fn is_path(&self) -> bool {
        matches!(
            self,
            ArgType::File | ArgType::Directory | ArgType::Raster | ArgType::Vector | ArgType::Csv
        )
    }

    /// Whether values of this type are numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ArgType::Number | ArgType::Integer | ArgType::Ratio | ArgType::Percent
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::Number => "number",
            ArgType::Integer => "integer",
            ArgType::Ratio => "ratio",
            ArgType::Percent => "percent",
            ArgType::Boolean => "boolean",
            ArgType::FreestyleString => "freestyle_string",
            ArgType::OptionString => "option_string",
            ArgType::File => "file",
            ArgType::Directory => "directory",
            ArgType::Raster => "raster",
            ArgType::Vector => "vector",
            ArgType::Csv => "csv",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Specification of a single model argument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArgSpec {
    /// Human-readable label shown in the client form
    pub name: String,

    /// Expected type of the value
    pub r#type: ArgType,

    /// Whether the argument must be present (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Help text for the argument (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Allowed values for option_string arguments: value -> description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,

    /// Regex the value must match, for string arguments (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp: Option<String>,

    /// Inclusive lower bound for numeric arguments (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Inclusive upper bound for numeric arguments (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl ArgSpec {
    /// Create a new argument spec with the given label and type
    pub fn new(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            r#type: arg_type,
            required: None,
            about: None,
            options: None,
            regexp: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Add help text
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the allowed option values
    pub fn with_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options = Some(
            options
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set a regex constraint
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.regexp = Some(pattern.into());
        self
    }

    /// Set an inclusive numeric range; either bound may be open
    pub fn with_numeric_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.minimum = min;
        self.maximum = max;
        self
    }

    /// Check if the argument is required
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Declarative parameter specification for one model.
///
/// Owned by the model definition; the facade treats it as read-only data and
/// serializes it verbatim to clients. `args` is a BTreeMap so the serialized
/// form has a stable key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSpec {
    /// Human-readable model name
    pub model_name: String,

    /// Module path the model is registered under
    pub module: String,

    /// User's guide section for the model (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userguide: Option<String>,

    /// Argument specifications keyed by argument key
    pub args: BTreeMap<String, ArgSpec>,
}

impl ModelSpec {
    /// Create a new model spec with no arguments
    pub fn new(model_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            module: module.into(),
            userguide: None,
            args: BTreeMap::new(),
        }
    }

    /// Set the user's guide section
    pub fn with_userguide(mut self, userguide: impl Into<String>) -> Self {
        self.userguide = Some(userguide.into());
        self
    }

    /// Add an argument spec under the given key
    pub fn with_arg(mut self, key: impl Into<String>, arg: ArgSpec) -> Self {
        self.args.insert(key.into(), arg);
        self
    }

    /// Get the spec for one argument key
    pub fn get_arg(&self, key: &str) -> Option<&ArgSpec> {
        self.args.get(key)
    }

    /// Keys of all required arguments, in spec order
    pub fn required_keys(&self) -> Vec<&str> {
        self.args
            .iter()
            .filter(|(_, spec)| spec.is_required())
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_spec_builders() {
        let arg = ArgSpec::new("Workspace", ArgType::Directory)
            .required()
            .with_about("Directory for output files");

        assert_eq!(arg.name, "Workspace");
        assert_eq!(arg.r#type, ArgType::Directory);
        assert!(arg.is_required());
        assert!(arg.r#type.is_path());
    }

    #[test]
    fn test_option_string_spec() {
        let arg = ArgSpec::new("Pool type", ArgType::OptionString)
            .with_options([("above", "aboveground"), ("below", "belowground")]);

        let options = arg.options.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options.get("above").unwrap(), "aboveground");
    }

    #[test]
    fn test_model_spec_required_keys() {
        let spec = ModelSpec::new("Test Model", "test_model")
            .with_arg("workspace_dir", ArgSpec::new("Workspace", ArgType::Directory).required())
            .with_arg("suffix", ArgSpec::new("Suffix", ArgType::FreestyleString).optional())
            .with_arg("n", ArgSpec::new("N", ArgType::Number).required());

        assert_eq!(spec.required_keys(), vec!["n", "workspace_dir"]);
        assert!(spec.get_arg("suffix").is_some());
        assert!(spec.get_arg("missing").is_none());
    }

    #[test]
    fn test_spec_serialization_round_trip() {
        let spec = ModelSpec::new("Test Model", "test_model")
            .with_userguide("test.html")
            .with_arg(
                "rate",
                ArgSpec::new("Rate", ArgType::Ratio)
                    .required()
                    .with_numeric_range(Some(0.0), Some(1.0)),
            );

        let json = serde_json::to_string(&spec).unwrap();
        let parsed: ModelSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
        assert!(json.contains("\"type\":\"ratio\""));
    }
}
