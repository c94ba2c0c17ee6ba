//! Tag operations.

use soundvault_core::{NewTag, Tag, TagId};
use tracing::debug;

use super::{fetch_list, require_body};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

const TAGS: &str = "/tags/";

/// Tag operations. Creating and deleting tags is admin-only on the server.
pub struct TagsApi<'a> {
    transport: &'a Transport,
}

impl<'a> TagsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// All tags, accepting either list shape.
    pub async fn list(&self) -> Result<Vec<Tag>> {
        let tags: Vec<Tag> = fetch_list(self.transport, TAGS, false).await?;
        debug!(count = tags.len(), "Fetched tags");
        Ok(tags)
    }

    pub async fn create(&self, name: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::invalid_input("Tag name cannot be empty"));
        }

        let body = self
            .transport
            .post_json(
                TAGS,
                &NewTag {
                    name: name.to_string(),
                },
                true,
            )
            .await?;
        require_body(body, TAGS)
    }

    pub async fn delete(&self, id: TagId) -> Result<()> {
        self.transport.delete(&format!("/tags/{}/", id), true).await
    }
}

/// Map comma-separated tag names to ids, case-insensitively.
///
/// Blank entries and names with no matching tag are skipped.
pub fn resolve_tag_ids(names: &str, tags: &[Tag]) -> Vec<TagId> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            tags.iter()
                .find(|tag| tag.name.to_lowercase() == name.to_lowercase())
                .map(|tag| tag.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: TagId, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_resolve_tag_ids() {
        let tags = vec![tag(1, "Nature"), tag(2, "Rain"), tag(3, "Urban")];

        assert_eq!(resolve_tag_ids("rain, NATURE", &tags), vec![2, 1]);
        assert_eq!(resolve_tag_ids(" , urban,,unknown ", &tags), vec![3]);
        assert!(resolve_tag_ids("", &tags).is_empty());
    }
}
