//! SoundVault Core
//!
//! Domain and wire types shared by the SoundVault client crates.
//!
//! The types mirror the JSON shapes served by the SoundVault content API:
//! - **Identity**: `User`, `Tokens`, `AuthResponse`, `RefreshResponse`
//! - **Catalog**: `Sound`, `SavedSound`, `Tag`, `Comment`, `FavoriteRecord`
//! - **Lists**: `ListResponse` normalizes bare arrays and paginated envelopes
//!
//! # Example
//!
//! ```rust
//! use soundvault_core::{ListResponse, Tag};
//!
//! let bare: ListResponse<Tag> =
//!     serde_json::from_str(r#"[{"id": 1, "name": "ambient"}]"#).unwrap();
//! let paged: ListResponse<Tag> =
//!     serde_json::from_str(r#"{"count": 1, "results": [{"id": 1, "name": "ambient"}]}"#)
//!         .unwrap();
//!
//! assert_eq!(bare.into_items(), paged.into_items());
//! ```

#![forbid(unsafe_code)]

pub mod types;

pub use types::{
    AuthResponse, Comment, CommentId, FavoriteRecord, ListResponse, NewComment, NewFavorite,
    NewTag, Page, RefreshResponse, SavedSound, Sound, SoundId, SoundRef, Tag, TagId, Tokens,
    Uploader, User, UserId,
};
