//! # modelstack
//!
//! Local HTTP facade for invoking a separately-maintained catalog of
//! environmental-simulation models: list available models, fetch a model's
//! declarative parameter specification, validate a candidate parameter set
//! against that specification, and read/write on-disk datastack files that
//! snapshot a model name plus its arguments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelstack::{FacadeServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = FacadeServer::new(ServerConfig::default());
//!     server.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! The core operations are also usable directly, without the HTTP layer:
//!
//! ```rust
//! use modelstack::registry;
//!
//! let entry = registry::lookup("carbon")?;
//! let definition = registry::load(entry.module_path)?;
//! assert!(!definition.argument_spec().args.is_empty());
//! # Ok::<(), modelstack::FacadeError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod datastack;
pub mod error;
pub mod registry;
pub mod server;
pub mod spec;
pub mod utils;
pub mod validation;

// Registry and loader exports
pub use registry::{
    argument_spec, load, lookup, model_list, ModelDefinition, ModelListEntry, RegistryEntry,
};

// Specification exports
pub use spec::{ArgSpec, ArgType, ModelSpec};

// Validation exports
pub use validation::{validate_args, validate_module, ArgsMap, ValidationEntry, ValidationReport};

// Datastack exports
pub use datastack::{
    read_datastack, write_parameter_set, write_python_script, DatastackRecord, DatastackType,
};

// Server exports
pub use server::FacadeServer;

// Configuration exports
pub use config::ServerConfig;

// Error exports
pub use error::{ErrorCode, FacadeError, Result};

/// Library version, embedded in parameter sets and generated scripts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
