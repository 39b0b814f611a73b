//! Per-call request options and payload sanitization.
//!
//! Absent values never reach the wire: query parameters and header
//! overrides set to `None` (or JSON `null`) are dropped, and `null`-valued
//! keys are stripped from object bodies (per element for array bodies).

use serde_json::Value;

/// Query parameters and header overrides for a single call.
///
/// Entries keep insertion order. Absent values are accepted here and
/// dropped when the request is built.
///
/// # Example
///
/// ```
/// use resman_client::connector::RequestOptions;
///
/// let person_id: Option<&str> = None;
/// let options = RequestOptions::new()
///     .param("propertyId", "p-1")
///     .param_opt("personId", person_id)
///     .param("includeLeaseHistory", true);
///
/// assert_eq!(
///     options.query_pairs(),
///     vec![
///         ("propertyId".to_string(), "p-1".to_string()),
///         ("includeLeaseHistory".to_string(), "true".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    params: Vec<(String, Value)>,
    headers: Vec<(String, Option<String>)>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter that may be absent.
    #[must_use]
    pub fn param_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        let value = value.map_or(Value::Null, Into::into);
        self.param(name, value)
    }

    /// Adds a header override.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Some(value.into())));
        self
    }

    /// Adds a header override that may be absent.
    #[must_use]
    pub fn header_opt(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers.push((name.into(), value));
        self
    }

    /// Returns the raw parameters, absent values included.
    #[must_use]
    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    /// Returns the query pairs to transmit, absent values removed.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name.clone(), render_param(value)))
            .collect()
    }

    /// Returns the header overrides to transmit, absent values removed.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        self.headers
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
            .collect()
    }
}

/// Renders a parameter value as query-string text.
///
/// Strings are used verbatim, arrays are comma-joined, everything else
/// uses its JSON text.
#[must_use]
pub fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(render_param)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Removes `null`-valued keys from an object body, or from each object
/// element of an array body.
///
/// Only the top level (or each top-level array element) is cleaned;
/// nested objects are sent as given.
#[must_use]
pub fn strip_absent(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(strip_object(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(strip_object(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn strip_object(map: serde_json::Map<String, Value>) -> serde_json::Map<String, Value> {
    map.into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect()
}
