//! reqwest-backed [`HttpClient`].

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// The transport used outside tests.
///
/// Sends exactly what the connector resolved: method, absolute URL,
/// headers, body and the per-attempt timeout.
///
/// ```no_run
/// use resman_client::connector::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("https://partners-api.myresman.com/Properties")?;
/// let response = ReqwestClient::new().request(HttpRequest::get(url)).await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured client, e.g. one behind a proxy.
    #[must_use]
    pub const fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self
            .inner
            .request(req.method, req.url.as_str())
            .headers(req.headers);

        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let headers = response.headers().clone();

        // The status is known from here on; a failed read must not look
        // like a missing response.
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Body {
                status,
                source: Box::new(e),
            })?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::Build(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
