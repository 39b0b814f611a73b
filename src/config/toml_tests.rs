//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parse {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.credentials.integration_partner_id.is_none());
        assert!(config.credentials.api_key.is_none());
        assert!(config.credentials.account_id.is_none());
        assert!(config.client.timeout_ms.is_none());
        assert!(config.client.base_url.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn full_document_is_parsed() {
        let config = TomlConfig::parse(
            r#"
            [credentials]
            integration_partner_id = "partner"
            api_key = "secret"
            account_id = "400"

            [client]
            timeout_ms = 5000
            base_url = "http://localhost:8080"

            [headers]
            X-Trace = "abc"
        "#,
        )
        .unwrap();

        assert_eq!(
            config.credentials.integration_partner_id.as_deref(),
            Some("partner")
        );
        assert_eq!(config.credentials.api_key.as_deref(), Some("secret"));
        assert_eq!(config.credentials.account_id.as_deref(), Some("400"));
        assert_eq!(config.client.timeout_ms, Some(5000));
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(
            config.headers.get("X-Trace").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse(
            r#"
            [credentials]
            password = "nope"
        "#,
        );

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse(
            r#"
            [client]
            timeout_ms = "fast"
        "#,
        );

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

#[test]
fn debug_output_hides_api_key() {
    let config = TomlConfig::parse(
        r#"
[credentials]
integration_partner_id = "partner"
api_key = "super-secret"
"#,
    )
    .unwrap();

    let debug = format!("{config:?}");

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
    assert!(debug.contains("partner"));
}

mod load {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [credentials]
            account_id = "123"
        "#
        )
        .unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.credentials.account_id.as_deref(), Some("123"));
    }

    #[test]
    fn missing_file_returns_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = TomlConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.credentials.api_key.is_none());
    }

    #[test]
    fn default_template_mentions_every_section() {
        let template = default_config_template();

        assert!(template.contains("[credentials]"));
        assert!(template.contains("[client]"));
        assert!(template.contains("[headers]"));
    }
}
