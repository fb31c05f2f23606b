use super::{bool_value, has_value};
use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use crate::validation::{ArgsMap, ValidationEntry, ValidationReport};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(Carbon { spec: build_spec() })
}

/// Carbon storage and sequestration
struct Carbon {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new("Carbon Storage and Sequestration", "carbon")
        .with_userguide("carbonstorage.html")
        .with_arg(
            "workspace_dir",
            ArgSpec::new("Workspace", ArgType::Directory)
                .required()
                .with_about("Directory where output files will be written"),
        )
        .with_arg(
            "results_suffix",
            ArgSpec::new("File suffix", ArgType::FreestyleString)
                .optional()
                .with_pattern("^[a-zA-Z0-9_-]*$"),
        )
        .with_arg(
            "lulc_cur_path",
            ArgSpec::new("Current land use/land cover", ArgType::Raster)
                .required()
                .with_about("Map of land use/land cover codes for the current scenario"),
        )
        .with_arg(
            "carbon_pools_path",
            ArgSpec::new("Carbon pools", ArgType::Csv)
                .required()
                .with_about("Table mapping each LULC code to carbon pool densities"),
        )
        .with_arg(
            "calc_sequestration",
            ArgSpec::new("Calculate sequestration", ArgType::Boolean).optional(),
        )
        .with_arg(
            "lulc_fut_path",
            ArgSpec::new("Future land use/land cover", ArgType::Raster).optional(),
        )
        .with_arg(
            "do_valuation",
            ArgSpec::new("Run valuation", ArgType::Boolean).optional(),
        )
        .with_arg(
            "price_per_metric_ton_of_c",
            ArgSpec::new("Price of carbon", ArgType::Number)
                .optional()
                .with_numeric_range(Some(0.0), None),
        )
        .with_arg(
            "discount_rate",
            ArgSpec::new("Annual market discount rate", ArgType::Percent).optional(),
        )
}

impl ModelDefinition for Carbon {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }

    fn cross_field_rules(&self, args: &ArgsMap) -> ValidationReport {
        let mut report = ValidationReport::new();

        if bool_value(args, "calc_sequestration") && !has_value(args, "lulc_fut_path") {
            report.push(ValidationEntry::joint(
                ["calc_sequestration", "lulc_fut_path"],
                "A future LULC raster is required to calculate sequestration",
            ));
        }

        if bool_value(args, "do_valuation") {
            if !bool_value(args, "calc_sequestration") {
                report.push(ValidationEntry::joint(
                    ["do_valuation", "calc_sequestration"],
                    "Valuation requires sequestration to be calculated",
                ));
            }
            for key in ["price_per_metric_ton_of_c", "discount_rate"] {
                if !has_value(args, key) {
                    report.push(ValidationEntry::joint(
                        ["do_valuation", key],
                        "Input is required when valuation is enabled",
                    ));
                }
            }
        }

        report
    }
}
