//! Typed async client for the ResMan property-management partner API.
//!
//! A [`ResManClient`] validates its credentials up front, authenticates
//! every request with HTTP Basic auth plus the `ResMan-Account-Id` header,
//! retries requests that got no response at all, and returns every outcome
//! as an [`ApiResponse`] instead of panicking.

pub mod client;
pub mod config;
pub mod connector;
pub mod resources;
pub mod time;

#[cfg(test)]
mod test_support;

pub use client::ResManClient;
pub use config::{ConfigError, ResManConfig, ValidatedConfig};
pub use connector::{ApiError, ApiResponse, ResManConnector, ResManError, RetryPolicy};
