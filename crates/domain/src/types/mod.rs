//! Domain types exchanged with the blog API

pub mod auth;
pub mod blog;
pub mod stats;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, RegisteredUser};
pub use blog::{
    Category, CategoryDetail, CategoryDraft, Comment, ImageUpload, LikeState, LikeToggle,
    PostDetail, PostDraft, PostQuery, PostSummary, PostWriteResult,
};
pub use stats::{CategoryCount, DashboardStats};
pub use user::{Role, User};
