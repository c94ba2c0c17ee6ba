//! Comment types

use serde::{Deserialize, Serialize};

use super::SoundId;

pub type CommentId = i64;

/// A user comment on a sound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub sound: Option<SoundId>,
    pub user_name: String,
    pub content: String,
    pub created_at: String,
}

/// Request body for posting a comment
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub sound: SoundId,
    pub content: String,
}
