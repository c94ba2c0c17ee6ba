//! Authentication payloads

use serde::{Deserialize, Serialize};

use super::User;

/// Access/refresh token pair. Opaque to the client: stored and replayed, never parsed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Success body of the login and registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub tokens: Tokens,
}

/// Success body of the token refresh endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

impl std::fmt::Debug for RefreshResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshResponse")
            .field("access", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_shape() {
        let response: AuthResponse = serde_json::from_value(serde_json::json!({
            "user": {"id": 1, "username": "alice", "email": "alice@example.com", "isAdmin": false},
            "tokens": {"access": "a1", "refresh": "r1"}
        }))
        .unwrap();

        assert_eq!(response.user.username, "alice");
        assert_eq!(response.tokens.access, "a1");
        assert_eq!(response.tokens.refresh, "r1");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let tokens = Tokens {
            access: "secret-access".to_string(),
            refresh: "secret-refresh".to_string(),
        };
        let rendered = format!("{:?}", tokens);
        assert!(!rendered.contains("secret"));
    }
}
