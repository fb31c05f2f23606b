use crate::catalog;
use crate::error::{FacadeError, Result};
use crate::spec::ModelSpec;
use crate::validation::{validate_args, ArgsMap, ValidationReport};
use log::{debug, error};
use std::sync::Arc;

/// The two capabilities the facade requires from any loaded model: a
/// declarative argument specification and a validation entry point.
///
/// This is the entire contract with the model catalog; the numerical
/// content of a model is invisible to the facade.
pub trait ModelDefinition: Send + Sync {
    /// The model's declared argument specification, read-only
    fn argument_spec(&self) -> &ModelSpec;

    /// Validate a flat argument payload, optionally scoped to `limit_to`.
    ///
    /// Runs the spec-driven engine, then appends the model's cross-field
    /// rules. Under `limit_to`, a cross-field entry survives only if its key
    /// set references a restricted parameter, so a scoped call never reports
    /// a violation for an unrelated parameter.
    fn validate(&self, args: &ArgsMap, limit_to: Option<&[String]>) -> ValidationReport {
        let mut report = validate_args(self.argument_spec(), args, limit_to);
        let mut extra = self.cross_field_rules(args);
        if let Some(limit) = limit_to {
            extra.retain_keys(limit);
        }
        report.entries.extend(extra.entries);
        report
    }

    /// Rules spanning several arguments (e.g. mutually exclusive options).
    /// The default has none.
    fn cross_field_rules(&self, _args: &ArgsMap) -> ValidationReport {
        ValidationReport::new()
    }
}

impl std::fmt::Debug for dyn ModelDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelDefinition({})", self.argument_spec().module)
    }
}

/// Resolve a module path to its model definition.
///
/// Dispatch goes through the catalog's static factory table; every
/// supported model is statically registered, so there is no reflection and
/// no code execution outside the catalog's own constructors. Constructing a
/// definition may be expensive; repeated loads of the same path always
/// expose an identical argument spec.
pub fn load(module_path: &str) -> Result<Arc<dyn ModelDefinition>> {
    debug!("loading model module '{}'", module_path);
    match catalog::instantiate(module_path) {
        Some(definition) => Ok(definition),
        None => {
            // Not retried: a missing model is a deployment error, not a
            // transient fault.
            error!("no model definition registered for module '{}'", module_path);
            Err(FacadeError::ModelLoad(module_path.to_string()))
        }
    }
}
