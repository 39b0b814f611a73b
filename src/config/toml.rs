//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with values supplied in code.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Credential section
    #[serde(default)]
    pub credentials: CredentialsSection,

    /// Client behavior section
    #[serde(default)]
    pub client: ClientSection,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Credential configuration section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Integration partner id issued by ResMan
    pub integration_partner_id: Option<String>,

    /// API key issued by ResMan
    pub api_key: Option<String>,

    /// Account id of the client whose data is accessed
    pub account_id: Option<String>,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("integration_partner_id", &self.integration_partner_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Client behavior configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// Base URL override
    pub base_url: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ResMan client configuration

[credentials]
# Integration partner id issued by ResMan (required)
# integration_partner_id = "your-partner-id"

# API key issued by ResMan (required)
# api_key = "your-api-key"

# Account id of the ResMan client whose data is accessed (required)
# account_id = "client-account-id"

[client]
# Per-attempt request timeout in milliseconds (default: 30000)
# timeout_ms = 30000

# Base URL of the partner API (default: https://partners-api.myresman.com)
# base_url = "https://partners-api.myresman.com"

[headers]
# Extra headers sent with every request
# X-Request-Source = "my-integration"
"#
    .to_string()
}
