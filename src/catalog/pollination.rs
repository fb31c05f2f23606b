use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(Pollination { spec: build_spec() })
}

struct Pollination {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new("Crop Pollination", "pollination")
        .with_userguide("croppollination.html")
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
            "landcover_raster_path",
            ArgSpec::new("Land cover map", ArgType::Raster).required(),
        )
        .with_arg(
            "landcover_biophysical_table_path",
            ArgSpec::new("Land cover biophysical table", ArgType::Csv)
                .required()
                .with_about("Nesting availability and floral resources per land cover class"),
        )
        .with_arg(
            "guild_table_path",
            ArgSpec::new("Pollinator guild table", ArgType::Csv).required(),
        )
        .with_arg(
            "farm_vector_path",
            ArgSpec::new("Farms map", ArgType::Vector).optional(),
        )
}

impl ModelDefinition for Pollination {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }
}
