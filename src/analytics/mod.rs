//! Analytics module
//!
//! Pagination and response shaping for the two analytics reporting APIs.
//!
//! # Overview
//!
//! - **Data API**: offset/limit pagination until `rowCount` rows are collected,
//!   merged into the last response
//! - **Reporting v4**: `nextPageToken` pagination, reports concatenated
//! - **Transforms**: `simplify`, `simplify_data_api`, `merge`, `process_filters`
//! - **Report operation**: `fetch_report` ties the above to node parameters

mod report;
mod request;
mod strategy;
mod transform;
mod types;

pub use report::fetch_report;
pub use request::analytics_request;
pub use strategy::{
    next_page_token, request_all_items, with_page_token, PageStrategy, DATA_API_PAGE_LIMIT,
};
pub use transform::{merge, process_filters, simplify, simplify_data_api};
pub use types::{
    ApiVersion, ColumnHeader, DateRangeValues, Report, ReportData, ReportRow, DATA_API_BASE_URL,
    REPORTING_API_BASE_URL,
};

#[cfg(test)]
mod tests;
