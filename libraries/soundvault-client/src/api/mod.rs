//! Domain API façade.
//!
//! Thin, stateless translations of domain intent into transport calls,
//! grouped by resource. Failures pass through from the transport unchanged.

mod comments;
mod favorites;
mod sounds;
mod tags;

pub use comments::CommentsApi;
pub use favorites::FavoritesApi;
pub use sounds::{mime_type_for_file, SoundForm, SoundQuery, SoundsApi, UploadFile};
pub use tags::{resolve_tag_ids, TagsApi};

use serde::de::DeserializeOwned;
use serde_json::Value;
use soundvault_core::ListResponse;

use crate::diagnostics::{Diagnostics, NonFatal};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// GET a collection and normalize bare arrays and paginated envelopes to a `Vec`.
///
/// Items are decoded one at a time: an item that does not fit `T` is
/// reported and skipped, the rest are kept in order.
async fn fetch_list<T: DeserializeOwned>(
    transport: &Transport,
    path: &str,
    requires_auth: bool,
) -> Result<Vec<T>> {
    let body = transport
        .get::<ListResponse<Value>>(path, requires_auth)
        .await?;
    Ok(decode_items(
        ListResponse::items_or_empty(body),
        path,
        transport.diagnostics(),
    ))
}

fn decode_items<T: DeserializeOwned>(
    items: Vec<Value>,
    path: &str,
    diagnostics: &Diagnostics,
) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                diagnostics.report(NonFatal::MalformedBody {
                    path: path.to_string(),
                    detail: format!("item {}: {}", index, e),
                });
                None
            }
        })
        .collect()
}

/// A single-resource body that must be present.
fn require_body<T>(body: Option<T>, path: &str) -> Result<T> {
    body.ok_or_else(|| ClientError::MissingBody(path.to_string()))
}

/// Append URL-encoded query parameters to a path. Empty `params` leaves it untouched.
fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", path, query)
}
