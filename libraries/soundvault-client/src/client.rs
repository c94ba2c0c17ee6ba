//! Main SoundVault client.

use std::sync::Arc;

use soundvault_storage::CredentialStore;
use tracing::debug;

use crate::api::{CommentsApi, FavoritesApi, SoundsApi, TagsApi};
use crate::config::ClientConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::session::SessionManager;
use crate::transport::Transport;

/// Entry point for talking to a SoundVault server.
///
/// Wires one transport, one session manager and one diagnostics channel
/// around a shared credential store.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use soundvault_client::{ClientConfig, SoundQuery, SoundVaultClient};
/// use soundvault_storage::MemoryCredentialStore;
///
/// let client = SoundVaultClient::new(
///     ClientConfig::new("https://sounds.example.com/api"),
///     Arc::new(MemoryCredentialStore::new()),
/// )?;
///
/// client.session().bootstrap().await;
/// client.session().login("alice", "secret").await?;
///
/// let sounds = client.sounds().list(&SoundQuery::new().tag("nature")).await?;
/// println!("Found {} sounds", sounds.len());
/// ```
#[derive(Debug)]
pub struct SoundVaultClient {
    transport: Transport,
    session: SessionManager,
    diagnostics: Diagnostics,
}

impl SoundVaultClient {
    /// Create a client. The session starts in `Loading`; call
    /// `session().bootstrap()` before relying on the auth state.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let diagnostics = Diagnostics::new();
        let transport = Transport::new(&config, Arc::clone(&store), diagnostics.clone())?;
        let session = SessionManager::new(transport.clone(), store, diagnostics.clone());

        debug!(base_url = %transport.base_url(), "Created SoundVault client");

        Ok(Self {
            transport,
            session,
            diagnostics,
        })
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Non-fatal events such as undecodable bodies or failed logout notifications.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn sounds(&self) -> SoundsApi<'_> {
        SoundsApi::new(&self.transport)
    }

    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(&self.transport)
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(&self.transport)
    }

    pub fn favorites(&self) -> FavoritesApi<'_> {
        FavoritesApi::new(&self.transport)
    }
}
