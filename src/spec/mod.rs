mod model_spec;

pub use model_spec::{ArgSpec, ArgType, ModelSpec};
