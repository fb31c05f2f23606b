use crate::datastack::{ARCHIVE_PARAMETER_SET_NAME, PARAMETER_SET_FORMAT_VERSION};
use crate::error::{FacadeError, Result};
use crate::utils::PathUtils;
use crate::validation::ArgsMap;
use flate2::read::GzDecoder;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Recognized datastack forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatastackType {
    ParameterSet,
    Archive,
}

/// Result of parsing a datastack file.
///
/// References its model by name only; reconciling the name against the
/// registry is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatastackRecord {
    pub stack_type: DatastackType,
    pub model_name: String,
    pub invest_version: String,
    pub args: ArgsMap,
}

/// On-disk layout of a parameter-set file
#[derive(Debug, Serialize, Deserialize)]
struct ParameterSetDocument {
    /// Absent in artifacts written before the tag was introduced
    #[serde(skip_serializing_if = "Option::is_none")]
    format_version: Option<u32>,
    model_name: String,
    invest_version: String,
    args: ArgsMap,
}

/// Read a datastack file and classify its format by content.
///
/// A JSON document carrying `model_name` and `args` is a parameter set; a
/// gzip stream is treated as a datastack archive. Anything else, including
/// an unreadable file, fails with [`FacadeError::DatastackParse`] and no
/// partial record is returned. Relative path values come back resolved
/// against the file's own directory.
pub fn read_datastack(filepath: &Path) -> Result<DatastackRecord> {
    info!("reading datastack from {}", filepath.display());
    let bytes = fs::read(filepath)
        .map_err(|e| FacadeError::datastack_parse(filepath.display().to_string(), e.to_string()))?;

    if bytes.starts_with(&GZIP_MAGIC) {
        debug!("gzip magic found, treating {} as archive", filepath.display());
        return read_archive(filepath, &bytes);
    }

    let record = parse_parameter_set(filepath, &bytes, DatastackType::ParameterSet)?;
    Ok(record)
}

fn parse_parameter_set(
    filepath: &Path,
    bytes: &[u8],
    stack_type: DatastackType,
) -> Result<DatastackRecord> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        FacadeError::datastack_parse(
            filepath.display().to_string(),
            format!("not a JSON document: {}", e),
        )
    })?;

    let looks_like_parameter_set = value
        .as_object()
        .map(|obj| obj.get("model_name").is_some() && obj.get("args").is_some())
        .unwrap_or(false);
    if !looks_like_parameter_set {
        return Err(FacadeError::datastack_parse(
            filepath.display().to_string(),
            "unrecognized datastack format (expected model_name and args keys)",
        ));
    }

    let document: ParameterSetDocument = serde_json::from_value(value).map_err(|e| {
        FacadeError::datastack_parse(
            filepath.display().to_string(),
            format!("structurally invalid parameter set: {}", e),
        )
    })?;

    if let Some(version) = document.format_version {
        if version > PARAMETER_SET_FORMAT_VERSION {
            warn!(
                "parameter set {} has format_version {} (newer than {})",
                filepath.display(),
                version,
                PARAMETER_SET_FORMAT_VERSION
            );
        }
    }

    let base_dir = filepath.parent().unwrap_or_else(|| Path::new("."));
    let args = resolve_relative_paths(document.args, base_dir);

    debug!(
        "parsed parameter set for model '{}' ({} args)",
        document.model_name,
        args.len()
    );
    Ok(DatastackRecord {
        stack_type,
        model_name: document.model_name,
        invest_version: document.invest_version,
        args,
    })
}

/// Resolve relative string values that name something on disk next to the
/// parameter file. Strings that do not resolve to an existing path are left
/// untouched; they may simply be strings.
fn resolve_relative_paths(args: ArgsMap, base_dir: &Path) -> ArgsMap {
    args.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if !Path::new(&s).is_absolute() => {
                    let candidate = PathUtils::resolve(Path::new(&s), base_dir);
                    if candidate.exists() {
                        Value::String(candidate.to_string_lossy().into_owned())
                    } else {
                        Value::String(s)
                    }
                }
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Extract a datastack archive (tar.gz) and parse the parameter set inside
fn read_archive(filepath: &Path, bytes: &[u8]) -> Result<DatastackRecord> {
    let extract_dir = tempfile::Builder::new()
        .prefix("datastack-")
        .tempdir()
        .map_err(|e| {
            FacadeError::datastack_parse(filepath.display().to_string(), e.to_string())
        })?
        // The extracted data backs the returned args; it must outlive this call.
        .into_path();

    let decoder = GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(&extract_dir).map_err(|e| {
        FacadeError::datastack_parse(
            filepath.display().to_string(),
            format!("could not extract archive: {}", e),
        )
    })?;
    debug!(
        "extracted archive {} into {}",
        filepath.display(),
        extract_dir.display()
    );

    let parameter_path = find_file(&extract_dir, ARCHIVE_PARAMETER_SET_NAME).ok_or_else(|| {
        FacadeError::datastack_parse(
            filepath.display().to_string(),
            format!("archive does not contain {}", ARCHIVE_PARAMETER_SET_NAME),
        )
    })?;

    let bytes = fs::read(&parameter_path).map_err(|e| {
        FacadeError::datastack_parse(filepath.display().to_string(), e.to_string())
    })?;
    parse_parameter_set(&parameter_path, &bytes, DatastackType::Archive)
}

fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.file_name().and_then(|f| f.to_str()) == Some(name) {
            return Some(path);
        }
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.iter().find_map(|subdir| find_file(subdir, name))
}

/// Write an argument set as a parameter-set file.
///
/// With `relativize` set, string values naming an existing file system path
/// are rewritten relative to the destination's directory so the artifact
/// stays portable when moved together with its inputs. The write goes
/// through a temporary file in the destination directory followed by a
/// rename, so a failed write never leaves an artifact that parses as valid.
pub fn write_parameter_set(
    args: &ArgsMap,
    model_name: &str,
    destination: &Path,
    relativize: bool,
) -> Result<()> {
    let base_dir = destination.parent().unwrap_or_else(|| Path::new("."));
    let args = if relativize {
        relativize_paths(args, base_dir)
    } else {
        args.clone()
    };

    let document = ParameterSetDocument {
        format_version: Some(PARAMETER_SET_FORMAT_VERSION),
        model_name: model_name.to_string(),
        invest_version: crate::VERSION.to_string(),
        args,
    };
    let contents = serde_json::to_string_pretty(&document)?;

    write_atomic(destination, contents.as_bytes())?;
    info!(
        "parameter set for '{}' written to {}",
        model_name,
        destination.display()
    );
    Ok(())
}

fn relativize_paths(args: &ArgsMap, base_dir: &Path) -> ArgsMap {
    args.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if Path::new(s).is_absolute() && Path::new(s).exists() => {
                    match PathUtils::make_relative(Path::new(s), base_dir) {
                        Some(relative) => {
                            debug!("relativized '{}' to '{}'", s, relative.display());
                            Value::String(relative.to_string_lossy().into_owned())
                        }
                        None => Value::String(s.clone()),
                    }
                }
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Write through a sibling temp file plus rename. Shared with the script
/// generator.
pub(super) fn write_atomic(destination: &Path, contents: &[u8]) -> Result<()> {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "datastack".to_string());
    let temp_path = destination.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, contents)
        .map_err(|e| FacadeError::persist(destination.display().to_string(), e))?;
    if let Err(e) = fs::rename(&temp_path, destination) {
        let _ = fs::remove_file(&temp_path);
        return Err(FacadeError::persist(destination.display().to_string(), e));
    }
    Ok(())
}
