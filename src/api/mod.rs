//! Access to the speedrun.com REST API
//!
//! This module contains the request plumbing shared by every lookup:
//! - The rate-limited fetcher and its HTTP client
//! - The link-following paginator for listing endpoints
//! - The wire types for pages and response envelopes

mod fetcher;
mod paginator;
pub mod types;

pub use fetcher::{build_http_client, ApiClient, ThrottlePolicy};
pub use paginator::Paginator;
pub use types::{next_link, DataEnvelope, PageEnvelope, PageLink, Pagination};
