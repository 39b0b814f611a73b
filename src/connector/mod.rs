//! Request execution pipeline for the ResMan partner API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and reading responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a reqwest implementation ([`ReqwestClient`])
//! - Basic-Auth credential encoding ([`basic_auth_token`])
//! - Per-call parameters and header overrides ([`RequestOptions`])
//! - Retry scheduling ([`RetryPolicy`], [`delay_for_attempt`])
//! - The authenticated connector with the four primitives ([`ResManConnector`])
//! - Uniform results ([`ApiResponse`], [`ResManError`])

mod auth;
mod base;
mod client;
mod error;
mod request;
mod response;
mod retry;
mod transport;


pub use auth::{authorization_header, basic_auth_token};
pub use base::{IsRetryable, ResManConnector};
pub use client::ReqwestClient;
pub use error::{ApiError, HttpError, INVALID_RESPONSE, REQUEST_ERROR, ResManError};
pub use request::{RequestOptions, render_param, strip_absent};
pub use response::{ApiResponse, decode, extract_field, extract_list, failure, normalize, success};
pub use retry::{DEFAULT_DELAYS, RetryPolicy, delay_for_attempt};
pub use transport::{HttpClient, HttpRequest, HttpResponse};
