//! User types
//!
//! `User` is the projection of the authenticated principal returned by the
//! login endpoint and embedded in posts and comments. The client caches it as
//! the session identity; the backend stays authoritative.

use serde::{Deserialize, Serialize};

/// Blog role assigned at registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// User as serialized by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_blog_admin: bool,
}

impl User {
    /// Admin views are unlocked by either the profile flag or the role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_blog_admin || self.role == Role::Admin
    }

    /// Whether this user may edit or delete content owned by `author_id`.
    #[must_use]
    pub fn can_modify(&self, author_id: i64) -> bool {
        self.id == author_id || self.is_blog_admin
    }

    /// First and last name joined, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}
