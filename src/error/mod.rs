mod facade_error;

pub use facade_error::{ErrorCode, FacadeError};

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, FacadeError>;
