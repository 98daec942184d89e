//! Pagination module
//!
//! Shared continuation types and the cursor paginator.
//!
//! # Overview
//!
//! Every paginated fetch in the crate is strictly serial: a page is awaited
//! before the next request is derived from it. Continuation state is local to
//! one call and discarded once the aggregated result is returned.

mod cursor;
mod types;

pub use cursor::CursorPaginator;
pub use types::{Continuation, NextPage, PaginationState};
