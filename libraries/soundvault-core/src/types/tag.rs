//! Tag types

use serde::{Deserialize, Serialize};

pub type TagId = i64;

/// A tag used to categorize sounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Request body for creating a tag
#[derive(Debug, Clone, Serialize)]
pub struct NewTag {
    pub name: String,
}
