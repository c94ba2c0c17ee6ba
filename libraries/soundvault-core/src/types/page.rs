//! List envelopes
//!
//! Collection endpoints answer either with a bare JSON array or with a
//! paginated envelope `{count, next, previous, results}`. Both decode into
//! [`ListResponse`] and flatten to the same `Vec` through
//! [`ListResponse::into_items`].

use serde::{Deserialize, Serialize};

/// Paginated envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A list body in either of the shapes the server produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Paginated(Page<T>),
}

impl<T> ListResponse<T> {
    /// Flatten to the plain ordered sequence.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Paginated(page) => page.results,
        }
    }

    /// Flatten an optional body, treating an absent body as an empty list.
    pub fn items_or_empty(body: Option<Self>) -> Vec<T> {
        body.map(Self::into_items).unwrap_or_default()
    }
}
