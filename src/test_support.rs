//! Shared fixtures for unit tests: a scripted HTTP client and a recording sleeper.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::config::{ResManConfig, ValidatedConfig};
use crate::connector::{HttpClient, HttpError, HttpRequest, HttpResponse, ResManConnector};
use crate::time::Sleeper;

pub const PARTNER_ID: &str = "partner";
pub const API_KEY: &str = "key";
pub const ACCOUNT_ID: &str = "400";

/// Mock HTTP client that replays a scripted sequence of outcomes.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(vec![Ok(HttpResponse::json(
            http::StatusCode::from_u16(status).unwrap(),
            body,
        ))])
    }

    pub fn ok(body: &Value) -> Self {
        Self::json(200, body)
    }

    pub fn timeouts(count: usize) -> Self {
        Self::new((0..count).map(|_| Err(HttpError::Timeout)).collect())
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests().pop().expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client ran out of scripted responses")
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Sleeper that returns immediately and remembers every requested delay.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub fn settings() -> ResManConfig {
    ResManConfig::new(PARTNER_ID, API_KEY, ACCOUNT_ID)
}

pub fn config() -> ValidatedConfig {
    ValidatedConfig::from_raw(&settings(), None).unwrap()
}

pub type TestConnector = ResManConnector<Arc<MockClient>, RecordingSleeper>;

/// Builds a connector over `mock` that records its retry delays.
pub fn connector(mock: &Arc<MockClient>) -> TestConnector {
    recording_connector(mock).0
}

/// Like [`connector`], also returning a handle to the recorded delays.
pub fn recording_connector(mock: &Arc<MockClient>) -> (TestConnector, RecordingSleeper) {
    let sleeper = RecordingSleeper::default();
    let connector = ResManConnector::with_client(Arc::clone(mock), config())
        .unwrap()
        .with_sleeper(sleeper.clone());
    (connector, sleeper)
}

/// Returns the query string of `request` decoded into pairs.
pub fn query_of(request: &HttpRequest) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Returns the JSON body of `request`.
pub fn body_of(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}
