//! Request module
//!
//! The request side of every helper in the crate:
//!
//! - `RequestOptions` - an immutable-by-convention description of one request
//! - `RequestExecutor` - the capability that turns options into a parsed JSON body
//! - `parse_and_set_body_json` - fills a request body from a JSON node parameter

mod body;
mod executor;
mod types;

pub use body::parse_and_set_body_json;
pub use executor::RequestExecutor;
pub use types::RequestOptions;
