//! Authentication payloads

use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Body of `POST login/`
///
/// The backend accepts either a username or an e-mail in `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username_or_email.into(), password: password.into() }
    }
}

/// Response of `POST login/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Response of `POST token/refresh/`
///
/// `refresh` is only present when the backend rotates refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body of `POST register/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Response of `POST register/` (write-only fields are omitted by the backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_response_without_rotation() {
        let parsed: RefreshResponse = serde_json::from_str(r#"{"access": "A2"}"#).unwrap();
        assert_eq!(parsed.access, "A2");
        assert_eq!(parsed.refresh, None);
    }

    #[test]
    fn register_request_omits_empty_names() {
        let request = RegisterRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            first_name: None,
            last_name: None,
            role: Role::Admin,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("first_name").is_none());
        assert_eq!(json["role"], "admin");
    }
}
