//! Basic-Auth credential encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;

/// Returns the base64 of `"{integration_partner_id}:{api_key}"`.
///
/// ```
/// use resman_client::connector::basic_auth_token;
///
/// assert_eq!(basic_auth_token("partner", "key"), "cGFydG5lcjprZXk=");
/// ```
#[must_use]
pub fn basic_auth_token(integration_partner_id: &str, api_key: &str) -> String {
    STANDARD.encode(format!("{integration_partner_id}:{api_key}"))
}

/// Returns the `Authorization` header value for the given credentials.
///
/// The value is marked sensitive so it is hidden from `Debug` output.
#[must_use]
pub fn authorization_header(integration_partner_id: &str, api_key: &str) -> HeaderValue {
    let token = basic_auth_token(integration_partner_id, api_key);
    // base64 output is always a valid header value
    let mut value = HeaderValue::try_from(format!("Basic {token}"))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
    value.set_sensitive(true);
    value
}
