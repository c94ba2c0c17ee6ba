//! Sound types

use serde::{Deserialize, Serialize};

use super::{Comment, Tag, TagId, UserId};

pub type SoundId = i64;

/// An audio asset in the catalog.
///
/// List endpoints return the short form; the detail endpoint fills in
/// `updated_at`, `favorite_count` and the most recent `comments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub id: SoundId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub mp3_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub uploaded_by: Option<Uploader>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

impl Sound {
    /// Whether the sound carries a tag with the given name (case-insensitive).
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Uploader of a sound: a bare username in list views, an account object in detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uploader {
    Name(String),
    Account {
        id: UserId,
        username: String,
        #[serde(default)]
        email: String,
    },
}

impl Uploader {
    pub fn username(&self) -> &str {
        match self {
            Uploader::Name(name) => name,
            Uploader::Account { username, .. } => username,
        }
    }
}

/// A sound as echoed back by create and update.
///
/// The write endpoints answer with ids instead of nested objects: `tags`
/// are tag ids, `uploaded_by` is a user id, and the stored files appear as
/// `mp3_file`/`image` rather than absolute URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSound {
    pub id: SoundId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mp3_file: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "Vec::new")]
    pub tags: Vec<TagId>,
    #[serde(default)]
    pub uploaded_by: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_form() {
        let sound: Sound = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Rain on tin roof",
            "description": null,
            "image_url": null,
            "mp3_url": "https://cdn.example.com/sounds/mp3/rain.mp3",
            "tags": [{"id": 1, "name": "Nature"}],
            "uploaded_by": "admin",
            "created_at": "2024-05-01T10:00:00Z",
            "is_favorite": false
        }))
        .unwrap();

        assert_eq!(sound.uploaded_by.as_ref().map(Uploader::username), Some("admin"));
        assert!(sound.has_tag("nature"));
        assert!(sound.comments.is_none());
    }

    #[test]
    fn test_detail_form() {
        let sound: Sound = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Rain on tin roof",
            "tags": [],
            "uploaded_by": {"id": 1, "username": "admin", "email": "admin@example.com", "is_staff": true},
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z",
            "favorite_count": 4,
            "comments": [{
                "id": 9,
                "sound": 3,
                "user_name": "alice",
                "content": "lovely",
                "created_at": "2024-05-03T10:00:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(sound.uploaded_by.as_ref().map(Uploader::username), Some("admin"));
        assert_eq!(sound.favorite_count, Some(4));
        assert_eq!(sound.comments.map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_write_form() {
        let saved: SavedSound = serde_json::from_value(serde_json::json!({
            "id": 10,
            "name": "Rain",
            "description": "",
            "mp3_file": "https://cdn.example.com/sounds/mp3/rain.mp3",
            "image": null,
            "tags": [1, 2],
            "uploaded_by": 1,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(saved.tags, vec![1, 2]);
        assert_eq!(saved.uploaded_by, Some(1));
        assert!(saved.image.is_none());

        // The read shape is not accepted here, and vice versa
        assert!(serde_json::from_value::<Sound>(serde_json::to_value(&saved).unwrap()).is_err());
    }
}
