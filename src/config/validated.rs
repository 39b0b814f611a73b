//! Validated configuration after merging code-supplied and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the connector. All validation is performed during construction.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Raw client settings supplied in code.
///
/// Empty strings and `None` mean "not set here"; such fields fall back to
/// the TOML file (if any) and then to built-in defaults.
///
/// # Example
///
/// ```
/// use resman_client::config::{ResManConfig, ValidatedConfig};
///
/// let raw = ResManConfig::new("partner-id", "api-key", "account-id")
///     .with_timeout_ms(10_000)
///     .with_header("X-Request-Source", "nightly-sync");
///
/// let config = ValidatedConfig::from_raw(&raw, None).unwrap();
/// assert_eq!(config.timeout.as_millis(), 10_000);
/// ```
#[derive(Clone, Default)]
pub struct ResManConfig {
    /// Integration partner id issued by ResMan
    pub integration_partner_id: String,

    /// API key issued by ResMan
    pub api_key: String,

    /// Account id of the client whose data is accessed
    pub account_id: String,

    /// Per-attempt timeout in milliseconds (default: 30000)
    pub timeout_ms: Option<u64>,

    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,

    /// Base URL override (default: the ResMan partner API host)
    pub base_url: Option<String>,
}

impl ResManConfig {
    /// Creates settings from the three required credential fields.
    #[must_use]
    pub fn new(
        integration_partner_id: impl Into<String>,
        api_key: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            integration_partner_id: integration_partner_id.into(),
            api_key: api_key.into(),
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    /// Sets the per-attempt timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Adds an extra header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl fmt::Debug for ResManConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResManConfig")
            .field("integration_partner_id", &self.integration_partner_id)
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("timeout_ms", &self.timeout_ms)
            .field("headers", &self.headers)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Fully validated configuration ready for use by the connector.
///
/// All required credential fields are non-empty and every header is a
/// valid HTTP header.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from code-supplied settings
/// and an optional TOML config, or [`ValidatedConfig::load`] to read the
/// TOML file from disk first.
#[derive(Clone)]
pub struct ValidatedConfig {
    /// Integration partner id (required)
    pub integration_partner_id: String,

    /// API key (required)
    pub api_key: String,

    /// ResMan account id (required)
    pub account_id: String,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Extra headers sent with every request
    pub headers: HeaderMap,

    /// Base URL requests are resolved against
    pub base_url: Url,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, partner_id: {}, account_id: {}, timeout: {}ms, extra_headers: {} }}",
            self.base_url,
            self.integration_partner_id,
            self.account_id,
            self.timeout.as_millis(),
            self.headers.len(),
        )
    }
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("integration_partner_id", &self.integration_partner_id)
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from code-supplied settings and an
    /// optional TOML config.
    ///
    /// Code-supplied values take precedence over TOML values. Required
    /// fields are checked in the order partner id, API key, account id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required credential field is missing or empty
    /// - The timeout is zero
    /// - The base URL is invalid
    /// - A header name or value is invalid
    pub fn from_raw(raw: &ResManConfig, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let integration_partner_id = resolve_required(
            &raw.integration_partner_id,
            toml.and_then(|t| t.credentials.integration_partner_id.as_deref()),
            field::INTEGRATION_PARTNER_ID,
            "Integration Partner ID is required; set it in code or credentials.integration_partner_id",
        )?;

        let api_key = resolve_required(
            &raw.api_key,
            toml.and_then(|t| t.credentials.api_key.as_deref()),
            field::API_KEY,
            "API key is required; set it in code or credentials.api_key",
        )?;

        let account_id = resolve_required(
            &raw.account_id,
            toml.and_then(|t| t.credentials.account_id.as_deref()),
            field::ACCOUNT_ID,
            "ResMan Account ID is required; set it in code or credentials.account_id",
        )?;
        validate_account_id(&account_id)?;

        let timeout = Self::resolve_timeout(raw, toml)?;
        let base_url = Self::resolve_base_url(raw, toml)?;
        let headers = Self::resolve_headers(raw, toml)?;

        Ok(Self {
            integration_partner_id,
            api_key,
            account_id,
            timeout,
            headers,
            base_url,
        })
    }

    /// Loads the TOML file at `path` and merges it with `raw`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(raw: &ResManConfig, path: &Path) -> Result<Self, ConfigError> {
        let toml = TomlConfig::load(path)?;
        Self::from_raw(raw, Some(&toml))
    }

    /// Returns a copy with new credentials, leaving every other field intact.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if either value is empty.
    pub fn with_credentials(
        &self,
        integration_partner_id: &str,
        api_key: &str,
    ) -> Result<Self, ConfigError> {
        let integration_partner_id = resolve_required(
            integration_partner_id,
            None,
            field::INTEGRATION_PARTNER_ID,
            "Integration Partner ID is required",
        )?;
        let api_key = resolve_required(api_key, None, field::API_KEY, "API key is required")?;

        Ok(Self {
            integration_partner_id,
            api_key,
            ..self.clone()
        })
    }

    /// Returns a copy with a new account id, leaving every other field intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the account id is empty or not a valid header value.
    pub fn with_account_id(&self, account_id: &str) -> Result<Self, ConfigError> {
        let account_id = resolve_required(
            account_id,
            None,
            field::ACCOUNT_ID,
            "ResMan Account ID is required",
        )?;
        validate_account_id(&account_id)?;

        Ok(Self {
            account_id,
            ..self.clone()
        })
    }

    fn resolve_timeout(
        raw: &ResManConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let Some(ms) = raw
            .timeout_ms
            .or_else(|| toml.and_then(|t| t.client.timeout_ms))
        else {
            return Ok(defaults::timeout());
        };

        if ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(Duration::from_millis(ms))
    }

    fn resolve_base_url(raw: &ResManConfig, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = raw
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    fn resolve_headers(
        raw: &ResManConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so code-supplied values override
        if let Some(toml) = toml {
            for (name, value) in &toml.headers {
                headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
            }
        }

        for (name, value) in &raw.headers {
            headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }

        Ok(headers)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_required(
    value: &str,
    fallback: Option<&str>,
    field: &'static str,
    hint: &'static str,
) -> Result<String, ConfigError> {
    if !value.is_empty() {
        return Ok(value.to_string());
    }

    fallback
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ConfigError::missing(field, hint))
}

fn validate_account_id(account_id: &str) -> Result<(), ConfigError> {
    parse_header_value(defaults::ACCOUNT_ID_HEADER, account_id).map(|_| ())
}

pub(crate) fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
