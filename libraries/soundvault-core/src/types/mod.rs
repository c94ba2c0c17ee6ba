mod auth;
mod comment;
mod favorite;
mod page;
mod sound;
mod tag;
mod user;

pub use auth::{AuthResponse, RefreshResponse, Tokens};
pub use comment::{Comment, CommentId, NewComment};
pub use favorite::{FavoriteRecord, NewFavorite, SoundRef};
pub use page::{ListResponse, Page};
pub use sound::{SavedSound, Sound, SoundId, Uploader};
pub use tag::{NewTag, Tag, TagId};
pub use user::{User, UserId};
