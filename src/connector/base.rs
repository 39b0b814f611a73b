//! The base connector: authenticated requests with retries.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::{
    ConfigError, ResManConfig, ValidatedConfig, defaults, parse_header_name, parse_header_value,
};
use crate::time::{Sleeper, TokioSleeper};

use super::auth::authorization_header;
use super::request::strip_absent;
use super::response::normalize;
use super::{
    ApiError, ApiResponse, HttpClient, HttpError, HttpRequest, HttpResponse, RequestOptions,
    ReqwestClient, ResManError, RetryPolicy,
};

/// Authenticated connector to the ResMan partner API.
///
/// Exposes the four primitives every resource module is built on:
/// [`get`](Self::get), [`post`](Self::post), [`put`](Self::put) and
/// [`patch`](Self::patch). Each returns the raw JSON payload as an
/// [`ApiResponse`]; failures are logged and returned, never panicked.
///
/// # Retries
///
/// A call is attempted up to [`RetryPolicy::max_attempts`] times. Only
/// failures without a response (connection errors, timeouts) are retried;
/// any status-coded response ends the call immediately.
///
/// # Shared configuration
///
/// The configuration sits behind a lock so credentials and account can be
/// changed through `&self`. A call reads the configuration once, when it
/// builds its request. Calls already past that point keep the old values;
/// callers that need strict consistency should not update credentials
/// while requests are in flight.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct ResManConnector<H = ReqwestClient, S = TokioSleeper> {
    http: H,
    sleeper: S,
    retry_policy: RetryPolicy,
    state: RwLock<ConnectorState>,
}

#[derive(Debug, Clone)]
struct ConnectorState {
    config: ValidatedConfig,
    default_headers: HeaderMap,
}

impl ConnectorState {
    fn new(config: ValidatedConfig) -> Result<Self, ConfigError> {
        let default_headers = build_default_headers(&config)?;
        Ok(Self {
            config,
            default_headers,
        })
    }
}

impl ResManConnector<ReqwestClient, TokioSleeper> {
    /// Creates a connector using reqwest and real delays.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot produce valid
    /// default headers.
    pub fn new(config: ValidatedConfig) -> Result<Self, ConfigError> {
        Self::with_client(ReqwestClient::new(), config)
    }

    /// Validates `settings` and creates a connector from them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming the first missing
    /// credential field, or any other validation failure.
    pub fn from_settings(settings: &ResManConfig) -> Result<Self, ConfigError> {
        Self::new(ValidatedConfig::from_raw(settings, None)?)
    }
}

impl<H> ResManConnector<H, TokioSleeper> {
    /// Creates a connector around a custom HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot produce valid
    /// default headers.
    pub fn with_client(http: H, config: ValidatedConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::default(),
            state: RwLock::new(ConnectorState::new(config)?),
        })
    }
}

impl<H, S> ResManConnector<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ResManConnector<H, S2> {
        ResManConnector {
            http: self.http,
            sleeper,
            retry_policy: self.retry_policy,
            state: self.state,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &H {
        &self.http
    }

    /// Returns a snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> ValidatedConfig {
        self.read_state().config.clone()
    }

    /// Returns the current account id.
    #[must_use]
    pub fn account_id(&self) -> String {
        self.read_state().config.account_id.clone()
    }

    /// Returns the headers installed on every request.
    #[must_use]
    pub fn default_headers(&self) -> HeaderMap {
        self.read_state().default_headers.clone()
    }

    /// Replaces the credentials and re-installs the `Authorization` header.
    ///
    /// Affects calls that build their request after this returns; see the
    /// type-level docs on in-flight calls.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if either value is empty;
    /// the previous credentials stay in place.
    pub fn update_credentials(
        &self,
        integration_partner_id: &str,
        api_key: &str,
    ) -> Result<(), ConfigError> {
        self.replace_config(|config| config.with_credentials(integration_partner_id, api_key))?;
        tracing::info!(integration_partner_id, "ResMan credentials updated");
        Ok(())
    }

    /// Replaces the account id and re-installs the `ResMan-Account-Id` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the account id is empty or not a valid header
    /// value; the previous account stays in place.
    pub fn update_account_id(&self, account_id: &str) -> Result<(), ConfigError> {
        self.replace_config(|config| config.with_account_id(account_id))?;
        tracing::info!(account_id, "ResMan account id updated");
        Ok(())
    }

    fn replace_config(
        &self,
        update: impl FnOnce(&ValidatedConfig) -> Result<ValidatedConfig, ConfigError>,
    ) -> Result<(), ConfigError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = ConnectorState::new(update(&state.config)?)?;
        *state = next;
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ConnectorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H: HttpClient, S: Sleeper> ResManConnector<H, S> {
    /// Sends a GET request to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError::Api`] for a status-coded failure or a request
    /// that could not be built, and [`ResManError::NoResponse`] once every
    /// attempt went unanswered.
    pub async fn get(&self, path: &str, options: RequestOptions) -> ApiResponse<Value> {
        self.execute(Method::GET, path, None, &options).await
    }

    /// Sends a POST request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get); a body that fails to serialize is an
    /// [`ApiError`] with code `REQUEST_ERROR`.
    pub async fn post<B>(&self, path: &str, body: &B, options: RequestOptions) -> ApiResponse<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute_with_body(Method::POST, path, body, &options)
            .await
    }

    /// Sends a PUT request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// As [`post`](Self::post).
    pub async fn put<B>(&self, path: &str, body: &B, options: RequestOptions) -> ApiResponse<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute_with_body(Method::PUT, path, body, &options)
            .await
    }

    /// Sends a PATCH request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// As [`post`](Self::post).
    pub async fn patch<B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute_with_body(Method::PATCH, path, body, &options)
            .await
    }

    async fn execute_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApiResponse<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        match serde_json::to_value(body) {
            Ok(value) => self.execute(method, path, Some(value), options).await,
            Err(e) => normalize(Err(ApiError::request(format!(
                "Failed to serialize request body: {e}"
            ))
            .into())),
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> ApiResponse<Value> {
        let outcome = match self.build_request(method, path, body, options) {
            Ok(request) => self.send_with_retry(&request).await,
            Err(e) => Err(e),
        };

        normalize(outcome)
    }

    /// Builds the request from the current configuration snapshot.
    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ResManError> {
        let (base_url, timeout, mut headers) = {
            let state = self.read_state();
            (
                state.config.base_url.clone(),
                state.config.timeout,
                state.default_headers.clone(),
            )
        };

        let url = resolve_url(&base_url, path, &options.query_pairs())
            .map_err(|e| ApiError::request(e.to_string()))?;

        for (name, value) in options.header_pairs() {
            let header_name =
                parse_header_name(name).map_err(|e| ApiError::request(e.to_string()))?;
            let header_value =
                parse_header_value(name, value).map_err(|e| ApiError::request(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let mut request = HttpRequest::new(method, url).with_timeout(timeout);
        request.headers = headers;

        if let Some(body) = body {
            let bytes = serde_json::to_vec(&strip_absent(body))
                .map_err(|e| ApiError::request(format!("Failed to encode request body: {e}")))?;
            request.body = Some(bytes);
        }

        Ok(request)
    }

    /// Sends with retry logic.
    async fn send_with_retry(&self, request: &HttpRequest) -> ApiResponse<Value> {
        let max_attempts = self.retry_policy.max_attempts();
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = self.retry_policy.delay_before(attempt);
                tracing::debug!(attempt = attempt + 1, ?delay, "Waiting before retry");
                self.sleeper.sleep(delay).await;
            }

            tracing::debug!(
                attempt = attempt + 1,
                method = %request.method,
                path = request.url.path(),
                "Sending ResMan request"
            );

            match self.http.request(request.clone()).await {
                Ok(response) if response.is_success() => return decode_success(&response),
                // Any status-coded response is final
                Ok(response) => return Err(ApiError::from_response(&response).into()),
                Err(HttpError::Body { status, source }) => {
                    return Err(unreadable_body(status, &*source).into());
                }
                Err(e) if !e.is_retryable() => return Err(ApiError::request(e.to_string()).into()),
                Err(e) => {
                    if self.retry_policy.should_retry(attempt) {
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_attempts,
                            error = %e,
                            "No response from ResMan, retrying"
                        );
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(ResManError::NoResponse {
            attempts: max_attempts,
            last_error: last_error
                .unwrap_or_else(|| HttpError::Connection("no attempt was made".into())),
        })
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            // Sent (or tried to), but nothing came back
            Self::Connection(_) | Self::Timeout => true,
            // Never left the process
            Self::InvalidUrl(_) | Self::Build(_) => false,
            // A status arrived, so the exchange is over
            Self::Body { .. } => false,
        }
    }
}

fn unreadable_body(status: StatusCode, source: &dyn std::error::Error) -> ApiError {
    if status.is_success() {
        ApiError::invalid_response(
            format!("Response body could not be read: {source}"),
            Some(status),
        )
    } else {
        ApiError::from_response(&HttpResponse::new(status, HeaderMap::new(), Vec::new()))
    }
}

fn decode_success(response: &HttpResponse) -> ApiResponse<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        ApiError::invalid_response(
            format!("Response body is not valid JSON: {e}"),
            Some(response.status),
        )
        .into()
    })
}

fn build_default_headers(config: &ValidatedConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in &config.headers {
        headers.insert(name.clone(), value.clone());
    }

    // Credential-derived headers always win over configured extras
    headers.insert(
        AUTHORIZATION,
        authorization_header(&config.integration_partner_id, &config.api_key),
    );
    headers.insert(
        HeaderName::from_static("resman-account-id"),
        parse_header_value(defaults::ACCOUNT_ID_HEADER, &config.account_id)?,
    );

    Ok(headers)
}

fn resolve_url(base: &Url, path: &str, query: &[(String, String)]) -> Result<Url, HttpError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| HttpError::InvalidUrl(format!("'{path}': {e}")))?;

    if url.origin() != base.origin() {
        return Err(HttpError::InvalidUrl(format!(
            "'{path}' resolves outside {}",
            base.origin().ascii_serialization()
        )));
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
}
