use crate::datastack;
use crate::error::{ErrorCode, FacadeError};
use crate::registry;
use crate::server::AppState;
use crate::validation::ArgsMap;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// Boundary translation of the error taxonomy into HTTP responses
#[derive(Debug)]
pub(crate) struct ApiError(FacadeError);

impl From<FacadeError> for ApiError {
    fn from(error: FacadeError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code() {
            // Client data errors
            ErrorCode::UnknownModel | ErrorCode::DatastackParse | ErrorCode::Serialization => {
                StatusCode::BAD_REQUEST
            }
            // Deployment/environment errors
            ErrorCode::ModelLoad | ErrorCode::Persist | ErrorCode::Io => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error!("request failed: {}", self.0);
        let body = json!({
            "error": self.0.code().as_str(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

pub(crate) async fn get_ready() -> &'static str {
    "modelstack ready"
}

pub(crate) async fn get_shutdown(State(state): State<AppState>) -> &'static str {
    // Ignore a full channel: a shutdown is already in flight
    let _ = state.shutdown.try_send(());
    "modelstack server shutting down..."
}

pub(crate) async fn get_models() -> Json<Vec<registry::ModelListEntry>> {
    Json(registry::model_list())
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetSpecPayload {
    model: String,
}

pub(crate) async fn post_getspec(
    Json(payload): Json<GetSpecPayload>,
) -> ApiResult<Json<Value>> {
    debug!("getspec for model '{}'", payload.model);
    let spec = registry::argument_spec(&payload.model)?;
    let spec = serde_json::to_value(&spec).map_err(FacadeError::from)?;
    Ok(Json(spec))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidatePayload {
    model_module: String,
    args: Value,
    #[serde(default)]
    limit_to: Option<Vec<String>>,
}

pub(crate) async fn post_validate(
    Json(payload): Json<ValidatePayload>,
) -> ApiResult<Json<Value>> {
    debug!("validate against module '{}'", payload.model_module);
    let args = coerce_args(payload.args)?;
    let report =
        crate::validation::validate_module(&payload.model_module, &args, payload.limit_to.as_deref())?;
    debug!("validation produced {} entries", report.len());
    let report = serde_json::to_value(&report).map_err(FacadeError::from)?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatastackFilePayload {
    datastack_path: String,
}

pub(crate) async fn post_datastack_file(
    Json(payload): Json<DatastackFilePayload>,
) -> ApiResult<Json<datastack::DatastackRecord>> {
    let record = datastack::read_datastack(Path::new(&payload.datastack_path))?;
    if registry::lookup(&record.model_name).is_err() {
        // The record still goes back to the caller; reconciling the model
        // name against the registry is their decision.
        warn!(
            "datastack references unregistered model '{}'",
            record.model_name
        );
    }
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WriteParameterSetPayload {
    parameter_set_path: String,
    model_name: String,
    args: Value,
    relative_paths: bool,
}

pub(crate) async fn post_write_parameter_set_file(
    Json(payload): Json<WriteParameterSetPayload>,
) -> ApiResult<&'static str> {
    let args = coerce_args(payload.args)?;
    datastack::write_parameter_set(
        &args,
        &payload.model_name,
        Path::new(&payload.parameter_set_path),
        payload.relative_paths,
    )?;
    Ok("parameter set saved")
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveToPythonPayload {
    filepath: String,
    modelname: String,
    pyname: String,
    args: Value,
}

pub(crate) async fn post_save_to_python(
    Json(payload): Json<SaveToPythonPayload>,
) -> ApiResult<&'static str> {
    let args = coerce_args(payload.args)?;
    datastack::write_python_script(
        &args,
        &payload.modelname,
        &payload.pyname,
        Path::new(&payload.filepath),
    )?;
    Ok("python script saved")
}

/// The desktop client sends the argument set either inline or as a JSON
/// string; accept both.
fn coerce_args(value: Value) -> std::result::Result<ArgsMap, ApiError> {
    let value = match value {
        Value::String(raw) => serde_json::from_str(&raw).map_err(FacadeError::from)?,
        other => other,
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError(FacadeError::Serialization(
            serde::de::Error::custom(format!(
                "args must be a JSON object, got {}",
                type_name(&other)
            )),
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
