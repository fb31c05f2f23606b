use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable error codes exposed at the HTTP boundary.
///
/// Each variant of [`FacadeError`] maps to exactly one code so that the
/// desktop client can branch on a string instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    UnknownModel,
    ModelLoad,
    DatastackParse,
    Persist,
    Serialization,
    Io,
}

impl ErrorCode {
    /// String representation used in serialized error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnknownModel => "UNKNOWN_MODEL",
            ErrorCode::ModelLoad => "MODEL_LOAD_FAILED",
            ErrorCode::DatastackParse => "DATASTACK_PARSE_FAILED",
            ErrorCode::Persist => "PERSIST_FAILED",
            ErrorCode::Serialization => "SERIALIZATION_FAILED",
            ErrorCode::Io => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error taxonomy for the model facade.
///
/// Validation-content problems (missing or invalid parameter values) are
/// never represented here; they are always normalized into a
/// `ValidationReport` and returned successfully. Only structural and
/// resolution failures reach this type.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// Model identifier not present in the registry (client error)
    #[error("unknown model identifier '{0}'")]
    UnknownModel(String),

    /// Module path registered but no definition could be resolved for it
    /// (configuration/deployment error, fatal for the request)
    #[error("model module '{0}' could not be loaded")]
    ModelLoad(String),

    /// Malformed, unreadable, or unrecognized datastack file
    #[error("failed to parse datastack '{path}': {reason}")]
    DatastackParse { path: String, reason: String },

    /// File system write failure; no partial artifact is left behind
    #[error("failed to persist '{path}': {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FacadeError {
    /// Stable code for this error, for boundary-layer translation
    pub fn code(&self) -> ErrorCode {
        match self {
            FacadeError::UnknownModel(_) => ErrorCode::UnknownModel,
            FacadeError::ModelLoad(_) => ErrorCode::ModelLoad,
            FacadeError::DatastackParse { .. } => ErrorCode::DatastackParse,
            FacadeError::Persist { .. } => ErrorCode::Persist,
            FacadeError::Serialization(_) => ErrorCode::Serialization,
            FacadeError::Io(_) => ErrorCode::Io,
        }
    }

    /// Shorthand for a parse failure with context
    pub fn datastack_parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FacadeError::DatastackParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a persistence failure with context
    pub fn persist(path: impl Into<String>, source: std::io::Error) -> Self {
        FacadeError::Persist {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = FacadeError::UnknownModel("not_a_model".to_string());
        assert_eq!(err.code(), ErrorCode::UnknownModel);
        assert_eq!(err.code().as_str(), "UNKNOWN_MODEL");

        let err = FacadeError::datastack_parse("/tmp/x.json", "not valid JSON");
        assert_eq!(err.code(), ErrorCode::DatastackParse);
    }

    #[test]
    fn test_error_display() {
        let err = FacadeError::UnknownModel("carbonn".to_string());
        assert_eq!(err.to_string(), "unknown model identifier 'carbonn'");

        let err = FacadeError::datastack_parse("params.json", "missing model_name");
        assert!(err.to_string().contains("params.json"));
        assert!(err.to_string().contains("missing model_name"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FacadeError = io.into();
        assert_eq!(err.code(), ErrorCode::Io);
    }
}
