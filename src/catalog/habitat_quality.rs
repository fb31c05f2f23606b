use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(HabitatQuality { spec: build_spec() })
}

struct HabitatQuality {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new("Habitat Quality", "habitat_quality")
        .with_userguide("habitat_quality.html")
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
            "lulc_cur_path",
            ArgSpec::new("Current land cover", ArgType::Raster).required(),
        )
        .with_arg(
            "lulc_fut_path",
            ArgSpec::new("Future land cover", ArgType::Raster).optional(),
        )
        .with_arg(
            "lulc_bas_path",
            ArgSpec::new("Baseline land cover", ArgType::Raster).optional(),
        )
        .with_arg(
            "threats_table_path",
            ArgSpec::new("Threats data", ArgType::Csv)
                .required()
                .with_about("Table of habitat threats and their weights"),
        )
        .with_arg(
            "sensitivity_table_path",
            ArgSpec::new("Sensitivity of land cover types to each threat", ArgType::Csv)
                .required(),
        )
        .with_arg(
            "half_saturation_constant",
            ArgSpec::new("Half-saturation constant", ArgType::Number)
                .required()
                .with_numeric_range(Some(0.0), None),
        )
}

impl ModelDefinition for HabitatQuality {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }
}
