//! Job loader module
//!
//! Parse job definitions from YAML or JSON files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `JobDefinition` - node, HTTP settings, parameters, request and pagination
//! - Parsing with validation

mod parser;
mod types;

pub use parser::{load_job, load_job_from_str};
pub use types::{HttpDefinition, JobDefinition, PaginationDefinition, RequestDefinition};
