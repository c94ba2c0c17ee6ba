//! SoundVault Client
//!
//! HTTP client library for the SoundVault content API.
//!
//! # Features
//!
//! - **Session**: Login with username or email, registration, logout and
//!   token refresh, with credentials persisted across restarts
//! - **Transport**: One request funnel with bearer auth and a uniform
//!   error contract
//! - **Catalog**: Sounds, tags, comments and favorites
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use soundvault_client::{ClientConfig, SoundVaultClient};
//! use soundvault_storage::SqliteCredentialStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteCredentialStore::open("sqlite://soundvault.db", "soundvault").await?;
//!     let client = SoundVaultClient::new(ClientConfig::default(), Arc::new(store))?;
//!
//!     // Restore any previous session
//!     client.session().bootstrap().await;
//!     if !client.session().is_authenticated() {
//!         client.session().login("alice@example.com", "secret").await?;
//!     }
//!
//!     for tag in client.tags().list().await? {
//!         println!("{}", tag.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod config;
mod diagnostics;
mod error;
mod session;
mod transport;

pub use api::{
    mime_type_for_file, resolve_tag_ids, CommentsApi, FavoritesApi, SoundForm, SoundQuery,
    SoundsApi, TagsApi, UploadFile,
};
pub use client::SoundVaultClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use diagnostics::{Diagnostics, NonFatal};
pub use error::{ClientError, Result};
pub use session::{AuthState, LoginIdentifier, SessionManager, SessionState};
pub use transport::{ApiRequest, RequestBody, Transport};
