//! User types

use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Snapshot of the signed-in account as reported by the server.
///
/// Replaced wholesale on login and refresh, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_flag_uses_wire_name() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "username": "alice", "email": "alice@example.com", "isAdmin": true}"#,
        )
        .unwrap();
        assert!(user.is_admin);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert!(json.get("is_admin").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let user: User = serde_json::from_str(r#"{"id": 1, "username": "bob"}"#).unwrap();
        assert_eq!(user.email, "");
        assert!(!user.is_admin);
    }
}
