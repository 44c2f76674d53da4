//! Application constants
//!
//! Endpoint paths are relative to the configured API base URL and keep the
//! trailing slash the backend routes expect.

/// Base URL used when no configuration overrides it.
pub const DEFAULT_API_BASE_URL: &str = "https://blogbackc-ch.onrender.com/api/";

// Authentication endpoints
pub const LOGIN_PATH: &str = "login/";
pub const REGISTER_PATH: &str = "register/";
pub const TOKEN_REFRESH_PATH: &str = "token/refresh/";

// Resource endpoints
pub const POSTS_PATH: &str = "posts/";
pub const CATEGORIES_PATH: &str = "categories/";
pub const ADMIN_CATEGORIES_PATH: &str = "admin/categories/";
pub const COMMENTS_PATH: &str = "comments/";

// Keychain service used when the storage config does not name one
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "blogc.session";

// Default file name for the file-backed credential store
pub const DEFAULT_STORE_FILE: &str = "blogc-session.json";
