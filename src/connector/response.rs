//! Result normalization.
//!
//! Every connector primitive and resource operation returns an
//! [`ApiResponse`]; failures are logged once, here, and handed back as
//! values.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, ResManError};

/// Result of any API call: the payload, or the reason there is none.
pub type ApiResponse<T> = Result<T, ResManError>;

/// Wraps a payload as a successful response.
///
/// # Errors
///
/// Never; the result is always `Ok`.
pub const fn success<T>(data: T) -> ApiResponse<T> {
    Ok(data)
}

/// Logs `error` and wraps it as a failed response.
///
/// # Errors
///
/// Always returns `error`.
pub fn failure<T>(error: impl Into<ResManError>) -> ApiResponse<T> {
    let error = error.into();
    log_failure(&error);
    Err(error)
}

/// Passes an outcome through, logging it if it is a failure.
///
/// # Errors
///
/// Returns the error of `outcome` unchanged.
pub fn normalize<T>(outcome: ApiResponse<T>) -> ApiResponse<T> {
    outcome.inspect_err(log_failure)
}

fn log_failure(error: &ResManError) {
    match error {
        ResManError::Api(api) => tracing::error!(
            status = api.status_code(),
            code = api.code.as_deref(),
            "ResMan request failed: {api}"
        ),
        ResManError::NoResponse { attempts, .. } => {
            tracing::error!(attempts, "ResMan request failed: {error}");
        }
        ResManError::InvalidArgument(_) => tracing::error!("ResMan request rejected: {error}"),
    }
}

/// Deserializes a whole payload.
///
/// # Errors
///
/// Returns an [`ApiError`] with code `INVALID_RESPONSE` if the payload
/// does not match `T`.
pub fn decode<T: DeserializeOwned>(payload: Value) -> ApiResponse<T> {
    serde_json::from_value(payload).map_err(|e| {
        ApiError::invalid_response(format!("Unexpected response payload: {e}"), None).into()
    })
}

/// Extracts and deserializes a required field of a response envelope.
///
/// # Errors
///
/// Returns an [`ApiError`] with code `INVALID_RESPONSE` if the field is
/// missing or does not match `T`.
pub fn extract_field<T: DeserializeOwned>(payload: Value, field: &str) -> ApiResponse<T> {
    let Value::Object(mut envelope) = payload else {
        return Err(ApiError::invalid_response(
            format!("Expected an object containing `{field}`"),
            None,
        )
        .into());
    };

    let value = envelope.remove(field).ok_or_else(|| {
        ResManError::from(ApiError::invalid_response(
            format!("Response is missing field `{field}`"),
            None,
        ))
    })?;

    serde_json::from_value(value).map_err(|e| {
        ApiError::invalid_response(format!("Unexpected value for `{field}`: {e}"), None).into()
    })
}

/// Extracts a list field of a response envelope.
///
/// A missing or `null` field yields an empty list.
///
/// # Errors
///
/// Returns an [`ApiError`] with code `INVALID_RESPONSE` if the payload is
/// not an object or the field is not a list of `T`.
pub fn extract_list<T: DeserializeOwned>(payload: Value, field: &str) -> ApiResponse<Vec<T>> {
    match payload {
        Value::Object(ref envelope) if envelope.get(field).is_none_or(Value::is_null) => {
            Ok(Vec::new())
        }
        other => extract_field(other, field),
    }
}
