use crate::registry::ModelDefinition;
use crate::spec::{ArgSpec, ArgType, ModelSpec};
use std::sync::Arc;

pub(super) fn definition() -> Arc<dyn ModelDefinition> {
    Arc::new(HabitatRiskAssessment { spec: build_spec() })
}

/// Habitat risk assessment; registered as `hra`, exposed to clients as
/// `habitat_risk_assessment`
struct HabitatRiskAssessment {
    spec: ModelSpec,
}

fn build_spec() -> ModelSpec {
    ModelSpec::new("Habitat Risk Assessment", "hra")
        .with_userguide("habitat_risk_assessment.html")
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
            "info_table_path",
            ArgSpec::new("Habitat stressor information", ArgType::Csv).required(),
        )
        .with_arg(
            "criteria_table_path",
            ArgSpec::new("Criteria scores", ArgType::Csv).required(),
        )
        .with_arg(
            "resolution",
            ArgSpec::new("Resolution of analysis (meters)", ArgType::Number)
                .required()
                .with_numeric_range(Some(1.0), None),
        )
        .with_arg(
            "max_rating",
            ArgSpec::new("Maximum criteria score", ArgType::Number)
                .required()
                .with_numeric_range(Some(1.0), None),
        )
        .with_arg(
            "risk_eq",
            ArgSpec::new("Risk equation", ArgType::OptionString)
                .required()
                .with_options([
                    ("euclidean", "Euclidean distance risk"),
                    ("multiplicative", "Multiplicative risk"),
                ]),
        )
        .with_arg(
            "decay_eq",
            ArgSpec::new("Decay equation", ArgType::OptionString)
                .required()
                .with_options([
                    ("none", "No decay"),
                    ("linear", "Linear decay"),
                    ("exponential", "Exponential decay"),
                ]),
        )
        .with_arg(
            "aoi_vector_path",
            ArgSpec::new("Area of interest", ArgType::Vector).required(),
        )
}

impl ModelDefinition for HabitatRiskAssessment {
    fn argument_spec(&self) -> &ModelSpec {
        &self.spec
    }
}
