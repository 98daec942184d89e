//! HTTP module
//!
//! The crate's own request executor: a reqwest client with retry, rate
//! limiting and backoff, wrapped so failures carry the issuing node.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Node-scoped errors**: `HttpExecutor` attaches node identity to failures

mod client;
mod executor;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use executor::HttpExecutor;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
