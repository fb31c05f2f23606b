use super::{bool_value, has_value};
use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use crate::validation::{ArgsMap, ValidationEntry, ValidationReport};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(SeasonalWaterYield { spec: build_spec() })
}

struct SeasonalWaterYield {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new(
        "Seasonal Water Yield",
        "seasonal_water_yield.seasonal_water_yield",
    )
    .with_userguide("seasonal_water_yield.html")
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
        "et0_dir",
        ArgSpec::new("Monthly reference evapotranspiration directory", ArgType::Directory)
            .required(),
    )
    .with_arg(
        "precip_dir",
        ArgSpec::new("Monthly precipitation directory", ArgType::Directory).required(),
    )
    .with_arg(
        "dem_raster_path",
        ArgSpec::new("Digital elevation model", ArgType::Raster).required(),
    )
    .with_arg(
        "lulc_raster_path",
        ArgSpec::new("Land use/land cover", ArgType::Raster).required(),
    )
    .with_arg(
        "soil_group_path",
        ArgSpec::new("Soil hydrologic group", ArgType::Raster).required(),
    )
    .with_arg(
        "aoi_path",
        ArgSpec::new("Area of interest/watershed", ArgType::Vector).required(),
    )
    .with_arg(
        "biophysical_table_path",
        ArgSpec::new("Biophysical table", ArgType::Csv).required(),
    )
    .with_arg(
        "threshold_flow_accumulation",
        ArgSpec::new("Threshold flow accumulation", ArgType::Integer)
            .required()
            .with_numeric_range(Some(0.0), None),
    )
    .with_arg(
        "user_defined_local_recharge",
        ArgSpec::new("User-defined recharge layer", ArgType::Boolean).optional(),
    )
    .with_arg(
        "l_path",
        ArgSpec::new("Local recharge raster", ArgType::Raster).optional(),
    )
}

impl ModelDefinition for SeasonalWaterYield {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }

    fn cross_field_rules(&self, args: &ArgsMap) -> ValidationReport {
        let mut report = ValidationReport::new();
        if bool_value(args, "user_defined_local_recharge") && !has_value(args, "l_path") {
            report.push(ValidationEntry::joint(
                ["user_defined_local_recharge", "l_path"],
                "A local recharge raster is required when user-defined recharge is enabled",
            ));
        }
        report
    }
}
