//! Session manager.
//!
//! Owns the authentication state machine and is the only writer of the
//! credential store.
//!
//! ```text
//! Loading ──bootstrap──► Authenticated(user) | Unauthenticated
//! Unauthenticated ──login/register──► Authenticated(user)
//! any ──logout / failed refresh──► Unauthenticated
//! ```
//!
//! `bootstrap`, `login`, `register`, `logout` and `refresh_auth` run one at
//! a time per session, so a refresh can never re-populate a token after a
//! concurrent logout has cleared it.

use std::sync::Arc;

use serde::Serialize;
use soundvault_core::{AuthResponse, RefreshResponse, User};
use soundvault_storage::{CredentialKey, CredentialStore};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::diagnostics::{Diagnostics, NonFatal};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

pub(crate) const AUTH_REGISTER: &str = "/auth/register/";
pub(crate) const AUTH_LOGIN: &str = "/auth/login/";
pub(crate) const AUTH_LOGOUT: &str = "/auth/logout/";
pub(crate) const AUTH_ME: &str = "/auth/me/";
pub(crate) const AUTH_REFRESH: &str = "/auth/token/refresh/";

/// Coarse authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Loading,
    Authenticated,
}

/// Full session state. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Stored credentials have not been consulted yet
    Loading,
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn auth_state(&self) -> AuthState {
        match self {
            SessionState::Loading => AuthState::Loading,
            SessionState::Unauthenticated => AuthState::Unauthenticated,
            SessionState::Authenticated(_) => AuthState::Authenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// How a login identifier is sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentifier<'a> {
    Email(&'a str),
    Username(&'a str),
}

impl<'a> LoginIdentifier<'a> {
    /// Anything containing `@` is treated as an email address.
    pub fn classify(identifier: &'a str) -> Self {
        if identifier.contains('@') {
            LoginIdentifier::Email(identifier)
        } else {
            LoginIdentifier::Username(identifier)
        }
    }
}

#[derive(Serialize)]
struct UsernameLogin<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailLogin<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Single owner of the authentication state.
pub struct SessionManager {
    transport: Transport,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    flight: Mutex<()>,
    diagnostics: Diagnostics,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a session in the `Loading` state. Call [`bootstrap`](Self::bootstrap) next.
    pub fn new(
        transport: Transport,
        store: Arc<dyn CredentialStore>,
        diagnostics: Diagnostics,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            transport,
            store,
            state,
            flight: Mutex::new(()),
            diagnostics,
        }
    }

    // =========================================================================
    // Read side
    // =========================================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.borrow().auth_state()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.auth_state() == AuthState::Loading
    }

    /// Watch state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The signed-in user, or [`ClientError::AuthRequired`].
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(ClientError::AuthRequired)
    }

    /// The signed-in user if they are an administrator.
    pub fn require_admin(&self) -> Result<User> {
        let user = self.require_user()?;
        if user.is_admin {
            Ok(user)
        } else {
            Err(ClientError::AdminRequired)
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Restore the session from the credential store.
    ///
    /// Always ends in `Authenticated` or `Unauthenticated`. Unexpected
    /// failures clear the store and are reported as
    /// [`NonFatal::BootstrapFailed`].
    pub async fn bootstrap(&self) -> SessionState {
        let _flight = self.flight.lock().await;

        let next = match self.restore().await {
            Ok(state) => state,
            Err(err) => {
                error!(error = %err, "Failed to restore session; clearing credentials");
                self.diagnostics.report(NonFatal::BootstrapFailed {
                    message: err.to_string(),
                });
                self.clear_credentials().await;
                SessionState::Unauthenticated
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Sign in with a username or an email address.
    ///
    /// On failure the state and the store are left as they were.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User> {
        let _flight = self.flight.lock().await;

        let response = match LoginIdentifier::classify(identifier) {
            LoginIdentifier::Email(email) => {
                debug!("Logging in with email");
                self.authenticate(AUTH_LOGIN, &EmailLogin { email, password })
                    .await?
            }
            LoginIdentifier::Username(username) => {
                debug!(username = %username, "Logging in with username");
                self.authenticate(AUTH_LOGIN, &UsernameLogin { username, password })
                    .await?
            }
        };

        self.establish(response).await
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let _flight = self.flight.lock().await;

        debug!(username = %username, "Registering account");
        let response = self
            .authenticate(
                AUTH_REGISTER,
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
            )
            .await?;

        self.establish(response).await
    }

    /// Sign out. Always succeeds locally; a failed server notification is
    /// reported as [`NonFatal::LogoutNotifyFailed`].
    pub async fn logout(&self) {
        let _flight = self.flight.lock().await;
        self.sign_out().await;
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Only the access token changes on success. On failure the session is
    /// logged out and the error returned, so the caller can prompt for login.
    pub async fn refresh_auth(&self) -> Result<()> {
        let _flight = self.flight.lock().await;

        let result = self.refresh_access_token().await;
        if let Err(err) = &result {
            warn!(error = %err, "Token refresh failed; signing out");
            self.sign_out().await;
        }
        result
    }

    // =========================================================================
    // Internals (callers hold the flight lock)
    // =========================================================================

    async fn restore(&self) -> Result<SessionState> {
        let stored = self.store.load().await?;

        let (Some(user_json), Some(_)) = (stored.user.as_deref(), stored.access_token.as_deref())
        else {
            if !stored.is_empty() {
                debug!("Discarding incomplete stored credentials");
                self.store.clear().await?;
            }
            return Ok(SessionState::Unauthenticated);
        };

        let user: User = serde_json::from_str(user_json)?;
        self.set_state(SessionState::Authenticated(user.clone()));

        match self.transport.get::<User>(AUTH_ME, true).await {
            Ok(_) => {
                info!(username = %user.username, "Restored session");
                return Ok(SessionState::Authenticated(user));
            }
            Err(err) => debug!(error = %err, "Stored access token rejected"),
        }

        let Some(refresh) = stored.refresh_token else {
            info!("No refresh token stored; signing out");
            self.store.clear().await?;
            return Ok(SessionState::Unauthenticated);
        };

        match self.exchange_refresh_token(&refresh).await {
            Ok(access) => {
                self.store.set(CredentialKey::AccessToken, &access).await?;
                info!(username = %user.username, "Restored session with refreshed token");
                Ok(SessionState::Authenticated(user))
            }
            Err(err) => {
                info!(error = %err, "Silent refresh failed; signing out");
                self.store.clear().await?;
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    async fn authenticate<B: Serialize>(&self, path: &str, body: &B) -> Result<AuthResponse> {
        self.transport
            .post_json::<AuthResponse, _>(path, body, false)
            .await?
            .ok_or_else(|| ClientError::MissingBody(path.to_string()))
    }

    /// Persist a fresh `{user, tokens}` pair and move to `Authenticated`.
    async fn establish(&self, response: AuthResponse) -> Result<User> {
        let AuthResponse { user, tokens } = response;
        let entries = [
            (CredentialKey::AccessToken, tokens.access),
            (CredentialKey::RefreshToken, tokens.refresh),
            (CredentialKey::User, serde_json::to_string(&user)?),
        ];

        if let Err(err) = self.store.set_many(&entries).await {
            error!(error = %err, "Failed to persist credentials; discarding partial state");
            self.clear_credentials().await;
            self.set_state(SessionState::Unauthenticated);
            return Err(err.into());
        }

        info!(username = %user.username, admin = user.is_admin, "Signed in");
        self.set_state(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    async fn refresh_access_token(&self) -> Result<()> {
        let refresh = self
            .store
            .get(CredentialKey::RefreshToken)
            .await?
            .ok_or(ClientError::NoRefreshToken)?;

        let access = self
            .exchange_refresh_token(&refresh)
            .await
            .map_err(|e| ClientError::RefreshRejected(Box::new(e)))?;

        self.store.set(CredentialKey::AccessToken, &access).await?;
        debug!("Access token refreshed");
        Ok(())
    }

    async fn exchange_refresh_token(&self, refresh: &str) -> Result<String> {
        self.transport
            .post_json::<RefreshResponse, _>(AUTH_REFRESH, &RefreshRequest { refresh }, false)
            .await?
            .map(|r| r.access)
            .ok_or_else(|| ClientError::MissingBody(AUTH_REFRESH.to_string()))
    }

    async fn sign_out(&self) {
        match self.store.get(CredentialKey::RefreshToken).await {
            Ok(Some(refresh)) => {
                let notified = self
                    .transport
                    .post_json::<serde_json::Value, _>(
                        AUTH_LOGOUT,
                        &RefreshRequest { refresh: &refresh },
                        true,
                    )
                    .await;
                if let Err(err) = notified {
                    self.diagnostics.report(NonFatal::LogoutNotifyFailed {
                        message: err.to_string(),
                    });
                }
            }
            Ok(None) => debug!("No refresh token stored; skipping server logout"),
            Err(err) => self.diagnostics.report(NonFatal::LogoutNotifyFailed {
                message: err.to_string(),
            }),
        }

        self.clear_credentials().await;
        self.set_state(SessionState::Unauthenticated);
        info!("Signed out");
    }

    async fn clear_credentials(&self) {
        if let Err(err) = self.store.clear().await {
            error!(error = %err, "Failed to clear stored credentials");
        }
    }

    fn set_state(&self, next: SessionState) {
        self.state.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classification() {
        assert_eq!(
            LoginIdentifier::classify("alice@example.com"),
            LoginIdentifier::Email("alice@example.com")
        );
        assert_eq!(
            LoginIdentifier::classify("alice"),
            LoginIdentifier::Username("alice")
        );
        // Only the presence of '@' matters
        assert_eq!(LoginIdentifier::classify("@"), LoginIdentifier::Email("@"));
    }

    #[test]
    fn test_state_projection() {
        let user = User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            is_admin: false,
        };

        assert_eq!(SessionState::Loading.auth_state(), AuthState::Loading);
        assert_eq!(
            SessionState::Unauthenticated.auth_state(),
            AuthState::Unauthenticated
        );
        let state = SessionState::Authenticated(user.clone());
        assert_eq!(state.auth_state(), AuthState::Authenticated);
        assert_eq!(state.user(), Some(&user));
        assert!(SessionState::Loading.user().is_none());
    }
}
