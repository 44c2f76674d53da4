//! Blog resources: posts, categories, comments and likes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Category as listed by `GET categories/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Read-only alias of `name` emitted by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slug: String,
}

/// Category detail with aggregate counters and its posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub posts: Vec<PostSummary>,
}

/// Body for creating or updating a category (admin only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

/// Post as returned by list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author: User,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Post as returned by `GET posts/<id>/`, with active comments inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author: User,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Response of post create/update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWriteResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Image file attached to a post draft
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Fields submitted when creating or updating a post
///
/// Sent as `multipart/form-data` so the optional image can ride along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category_id: i64,
    pub published: bool,
    pub image: Option<ImageUpload>,
}

/// Search and ordering parameters for `GET posts/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Matched against title, content, category name and author username
    pub search: Option<String>,
    /// `created_at`, `updated_at`, optionally prefixed with `-`
    pub ordering: Option<String>,
}

impl PostQuery {
    /// Query pairs in the order they are appended to the URL.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search));
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("ordering", ordering));
        }
        pairs
    }
}

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post: i64,
    pub user: User,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of `POST posts/<id>/like-toggle/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Liked,
    Unliked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub message: LikeState,
}

impl LikeToggle {
    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.message == LikeState::Liked
    }
}
