//! Favorite join records

use serde::{Deserialize, Serialize};

use super::{Sound, SoundId};

/// Reference to a sound inside a favorite record: either its id or the embedded sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoundRef {
    Id(SoundId),
    Embedded(Box<Sound>),
}

/// Server-side record linking the current user to a favorited sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sound: Option<SoundRef>,
    #[serde(default)]
    pub sound_detail: Option<Sound>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FavoriteRecord {
    /// Extract the referenced sound, preferring `sound_detail` over an embedded `sound`.
    ///
    /// Returns `None` when the record only carries an id or nothing at all.
    pub fn into_sound(self) -> Option<Sound> {
        match (self.sound_detail, self.sound) {
            (Some(detail), _) => Some(detail),
            (None, Some(SoundRef::Embedded(sound))) => Some(*sound),
            _ => None,
        }
    }
}

/// Request body for favoriting a sound
#[derive(Debug, Clone, Serialize)]
pub struct NewFavorite {
    pub sound: SoundId,
}
