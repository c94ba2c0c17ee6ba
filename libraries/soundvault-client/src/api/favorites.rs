//! Favorite operations.

use soundvault_core::{FavoriteRecord, NewFavorite, Sound, SoundId};
use tracing::debug;

use super::{fetch_list, require_body, with_query};
use crate::error::Result;
use crate::transport::Transport;

const FAVORITES: &str = "/favorites/";

/// The signed-in user's favorites.
pub struct FavoritesApi<'a> {
    transport: &'a Transport,
}

impl<'a> FavoritesApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Favorited sounds, unwrapped from their join records.
    ///
    /// Records whose sound is missing are dropped.
    pub async fn list(&self) -> Result<Vec<Sound>> {
        let records: Vec<FavoriteRecord> = fetch_list(self.transport, FAVORITES, true).await?;
        let total = records.len();

        let sounds: Vec<Sound> = records
            .into_iter()
            .filter_map(FavoriteRecord::into_sound)
            .collect();

        if sounds.len() < total {
            debug!(
                dropped = total - sounds.len(),
                "Skipped favorites without a sound"
            );
        }
        Ok(sounds)
    }

    pub async fn add(&self, sound_id: SoundId) -> Result<FavoriteRecord> {
        let body = self
            .transport
            .post_json(FAVORITES, &NewFavorite { sound: sound_id }, true)
            .await?;
        require_body(body, FAVORITES)
    }

    pub async fn remove(&self, sound_id: SoundId) -> Result<()> {
        let path = with_query("/favorites/remove/", &[("sound", &sound_id.to_string())]);
        self.transport.delete(&path, true).await
    }
}
