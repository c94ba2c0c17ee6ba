//! Comment operations.

use soundvault_core::{Comment, CommentId, NewComment, SoundId};

use super::{fetch_list, require_body, with_query};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

const COMMENTS: &str = "/comments/";

/// Comment operations. Posting and deleting need a signed-in user.
pub struct CommentsApi<'a> {
    transport: &'a Transport,
}

impl<'a> CommentsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Comments on a sound, newest first as served.
    pub async fn list(&self, sound_id: SoundId) -> Result<Vec<Comment>> {
        let path = with_query(COMMENTS, &[("sound", &sound_id.to_string())]);
        fetch_list(self.transport, &path, false).await
    }

    pub async fn create(&self, sound_id: SoundId, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(ClientError::invalid_input("Comment cannot be empty"));
        }

        let body = self
            .transport
            .post_json(
                COMMENTS,
                &NewComment {
                    sound: sound_id,
                    content: content.to_string(),
                },
                true,
            )
            .await?;
        require_body(body, COMMENTS)
    }

    pub async fn delete(&self, id: CommentId) -> Result<()> {
        self.transport
            .delete(&format!("/comments/{}/", id), true)
            .await
    }
}
