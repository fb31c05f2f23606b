use super::{bool_value, has_value};
use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use crate::validation::{ArgsMap, ValidationEntry, ValidationReport};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(DelineateIt { spec: build_spec() })
}

/// Watershed delineation from a DEM and outlet features
struct DelineateIt {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new("DelineateIt: Watershed Delineation", "delineateit")
        .with_userguide("delineateit.html")
        .with_arg(
            "workspace_dir",
            ArgSpec::new("Workspace", ArgType::Directory).required(),
        )
        .with_arg(
            "results_suffix",
            ArgSpec::new("File suffix", ArgType::FreestyleString)
                .optional()
                .with_pattern("^[a-zA-Z0-9_-]*$"),
        )
        .with_arg(
            "dem_path",
            ArgSpec::new("Digital elevation model", ArgType::Raster)
                .required()
                .with_about("Base DEM from which watersheds are delineated"),
        )
        .with_arg(
            "outlet_vector_path",
            ArgSpec::new("Outlet features", ArgType::Vector).required(),
        )
        .with_arg(
            "snap_points",
            ArgSpec::new("Snap points to the nearest stream", ArgType::Boolean).optional(),
        )
        .with_arg(
            "flow_threshold",
            ArgSpec::new("Threshold flow accumulation", ArgType::Integer)
                .optional()
                .with_numeric_range(Some(0.0), None),
        )
        .with_arg(
            "snap_distance",
            ArgSpec::new("Pixel distance to snap outlet points", ArgType::Integer)
                .optional()
                .with_numeric_range(Some(0.0), None),
        )
}

impl ModelDefinition for DelineateIt {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }

    fn cross_field_rules(&self, args: &ArgsMap) -> ValidationReport {
        let mut report = ValidationReport::new();
        if bool_value(args, "snap_points") {
            for key in ["flow_threshold", "snap_distance"] {
                if !has_value(args, key) {
                    report.push(ValidationEntry::joint(
                        ["snap_points", key],
                        "Input is required when snapping outlet points",
                    ));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snap_points_requires_parameters() {
        let definition = definition();
        let args = json!({"snap_points": true, "flow_threshold": 1000})
            .as_object()
            .unwrap()
            .clone();
        let report = definition.cross_field_rules(&args);
        assert_eq!(report.len(), 1);
        assert!(report.entries[0].keys.contains(&"snap_distance".to_string()));
    }
}
