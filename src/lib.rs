// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # flowpage
//!
//! Pagination and report aggregation for workflow-automation nodes.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Follow `nextCursor` across list endpoints
//! - **Analytics Reports**: Row-offset (data API) and page-token (reporting API) paging
//! - **Report Transforms**: Simplify rows into records, merge pages, build filters
//! - **HTTP**: Retry with backoff and client-side rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowpage::http::{HttpClient, HttpExecutor};
//! use flowpage::node::{NodeIdentity, NodeParameters};
//! use flowpage::pagination::CursorPaginator;
//! use flowpage::request::RequestOptions;
//!
//! #[tokio::main]
//! async fn main() -> flowpage::Result<()> {
//!     let node = NodeIdentity::new("List Workflows", "n8nApi");
//!     let client = HttpClient::new()?;
//!     let executor = HttpExecutor::new(client, node.clone());
//!     let params = NodeParameters::new(node).with("returnAll", true);
//!
//!     let request = RequestOptions::get("https://n8n.example.com/api/v1/workflows");
//!     let items = CursorPaginator::default()
//!         .fetch_all(&executor, &params, &request)
//!         .await?;
//!     println!("{} workflows", items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Node Operation                         │
//! │  fetch_all(executor, params, request) → Vec<ExecutionItem>      │
//! │  fetch_report(executor, params, request) → Vec<Value>           │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴──────────┬───────────────────────┐
//! │   Request  │        Pagination          │      Transform        │
//! ├────────────┼────────────────────────────┼───────────────────────┤
//! │ Executor   │ Cursor                     │ simplify              │
//! │ Body JSON  │ Row offset (data API)      │ merge                 │
//! │ Retry      │ Page token (reporting API) │ process_filters       │
//! │ Rate Limit │                            │                       │
//! └────────────┴────────────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Node identity and parameters
pub mod node;

/// Request options and executors
pub mod request;

/// HTTP client with retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Analytics report pagination and transforms
pub mod analytics;

/// YAML/JSON job definitions
pub mod loader;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use loader::{load_job, load_job_from_str, JobDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
