mod codec;
mod python_script;

pub use codec::{read_datastack, write_parameter_set, DatastackRecord, DatastackType};
pub use python_script::write_python_script;

/// Format tag written into parameter-set files
pub const PARAMETER_SET_FORMAT_VERSION: u32 = 1;

/// File name of the parameter set embedded in a datastack archive
pub const ARCHIVE_PARAMETER_SET_NAME: &str = "parameters.invest.json";
