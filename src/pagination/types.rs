//! Pagination types
//!
//! Continuation values and per-call bookkeeping shared by the cursor
//! paginator and the analytics page strategies.

use std::fmt;

/// Where the next page starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Opaque server-issued cursor
    Cursor(String),
    /// Client-computed offset (rows accumulated so far)
    Offset(u64),
    /// Opaque server-issued page token
    PageToken(String),
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Cursor(c) => write!(f, "cursor={c}"),
            Continuation::Offset(o) => write!(f, "offset={o}"),
            Continuation::PageToken(t) => write!(f, "pageToken={t}"),
        }
    }
}

/// Result of inspecting a response for another page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page is available from this continuation
    Continue(Continuation),
    /// No more pages
    Done,
}

impl NextPage {
    /// Continue from a cursor; an empty cursor means done
    pub fn cursor(cursor: Option<String>) -> Self {
        match cursor {
            Some(c) if !c.is_empty() => Self::Continue(Continuation::Cursor(c)),
            _ => Self::Done,
        }
    }

    /// Continue from a page token; an empty token means done
    pub fn page_token(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self::Continue(Continuation::PageToken(t)),
            _ => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Bookkeeping for one paginated fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Requests issued so far
    pub requests: u32,
    /// Items or rows accumulated so far
    pub total_fetched: u64,
    /// Continuation used by the next request
    pub continuation: Option<Continuation>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request and the items it contributed
    pub fn record_page(&mut self, items: usize) {
        self.requests += 1;
        self.total_fetched += items as u64;
    }

    /// Apply the outcome of a page
    pub fn advance(&mut self, next: NextPage) {
        match next {
            NextPage::Continue(c) => self.continuation = Some(c),
            NextPage::Done => {
                self.continuation = None;
                self.done = true;
            }
        }
    }

    /// Stop without a continuation
    pub fn mark_done(&mut self) {
        self.advance(NextPage::Done);
    }
}
