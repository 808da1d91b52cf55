//! Wire shapes for the speedrun.com REST API
//!
//! Only the fields the report needs are modelled. Everything else in the
//! payloads is ignored by serde.

use serde::Deserialize;

/// One page of a paginated listing
///
/// Both halves are optional so a malformed page can be detected and reported
/// instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Option<Vec<T>>,
    pub pagination: Option<Pagination>,
}

/// Pagination metadata attached to listing pages
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub links: Option<Vec<PageLink>>,
}

/// A relation-tagged link, e.g. `{"rel": "next", "uri": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageLink {
    pub rel: String,
    pub uri: String,
}

/// Non-paginated response wrapper: `{"data": ...}`
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Returns the URI of the link whose relation is `next`, wherever it sits
pub fn next_link(links: &[PageLink]) -> Option<&str> {
    links
        .iter()
        .find(|link| link.rel == "next")
        .map(|link| link.uri.as_str())
}
