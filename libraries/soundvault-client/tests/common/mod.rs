//! Shared fixtures for the client integration tests.

// Each test binary uses a subset
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use soundvault_client::{ClientConfig, SoundVaultClient};
use soundvault_storage::{CredentialKey, CredentialStore, MemoryCredentialStore};
use wiremock::MockServer;

/// Base URL the client is pointed at for a mock server.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// A client with an empty in-memory store, plus that store for assertions.
pub async fn client_for(server: &MockServer) -> (SoundVaultClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let client = SoundVaultClient::new(ClientConfig::new(api_base(server)), store.clone()).unwrap();
    (client, store)
}

pub fn user_json(username: &str, is_admin: bool) -> Value {
    json!({
        "id": 1,
        "username": username,
        "email": format!("{}@example.com", username),
        "isAdmin": is_admin
    })
}

pub fn auth_json(username: &str, is_admin: bool, access: &str, refresh: &str) -> Value {
    json!({
        "user": user_json(username, is_admin),
        "tokens": {"access": access, "refresh": refresh}
    })
}

pub fn sound_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "image_url": null,
        "mp3_url": format!("https://cdn.example.com/sounds/mp3/{}.mp3", id),
        "tags": [{"id": 1, "name": "Nature"}],
        "uploaded_by": "admin",
        "created_at": "2024-05-01T10:00:00Z",
        "is_favorite": false
    })
}

/// A sound as the create/update endpoints echo it: ids, not nested objects.
pub fn saved_sound_json(id: i64, name: &str, tags: &[i64]) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "mp3_file": format!("https://cdn.example.com/sounds/mp3/{}.mp3", id),
        "image": null,
        "tags": tags,
        "uploaded_by": 1,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn tag_json(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name})
}

/// Seed a signed-in user as a previous run would have left it.
pub async fn seed_credentials(store: &MemoryCredentialStore, access: &str, refresh: Option<&str>) {
    store.set(CredentialKey::AccessToken, access).await.unwrap();
    if let Some(refresh) = refresh {
        store.set(CredentialKey::RefreshToken, refresh).await.unwrap();
    }
    store
        .set(CredentialKey::User, &user_json("alice", false).to_string())
        .await
        .unwrap();
}
