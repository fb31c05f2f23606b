mod engine;

pub use engine::validate_args;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Flat argument payload supplied by the caller: argument key -> value
pub type ArgsMap = serde_json::Map<String, serde_json::Value>;

/// Validation adapter: load the model registered under `module_path` and
/// run its validation capability over the payload.
///
/// Only module resolution failures propagate as errors; everything the
/// payload itself can get wrong comes back inside the report.
pub fn validate_module(
    module_path: &str,
    args: &ArgsMap,
    limit_to: Option<&[String]>,
) -> Result<ValidationReport> {
    let definition = crate::registry::load(module_path)?;
    Ok(definition.validate(args, limit_to))
}

/// One violation found during validation.
///
/// `keys` names every argument the message applies to, so a single entry can
/// cover jointly-invalid parameters (e.g. mutually exclusive options).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationEntry {
    pub keys: Vec<String>,
    pub message: String,
}

impl ValidationEntry {
    /// Violation applying to a single argument key
    pub fn single(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            keys: vec![key.into()],
            message: message.into(),
        }
    }

    /// Violation applying to several argument keys jointly
    pub fn joint<I, K>(keys: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

/// Ordered sequence of violations; empty means the argument set is valid.
///
/// Serializes transparently as an array of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationReport {
    pub entries: Vec<ValidationEntry>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ValidationEntry) {
        self.entries.push(entry);
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose key set does not intersect `limit_to`.
    ///
    /// Used to scope cross-field rules during incremental validation: a rule
    /// that references a restricted parameter stays visible, everything else
    /// is filtered out.
    pub fn retain_keys(&mut self, limit_to: &[String]) {
        self.entries
            .retain(|entry| entry.keys.iter().any(|k| limit_to.iter().any(|l| l == k)));
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationEntry;
    type IntoIter = std::vec::IntoIter<ValidationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
