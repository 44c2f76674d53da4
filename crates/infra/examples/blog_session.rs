//! Example: Signing in and browsing the blog API
//!
//! Loads configuration (environment first, then `blogc.{json,toml}`),
//! opens the configured credential store, optionally signs in, and prints
//! the latest posts together with dashboard totals.
//!
//! # Setup
//!
//! 1. Put settings in `.env` or the environment:
//!
//!    ```text
//!    BLOGC_API_BASE_URL=https://blogbackc-ch.onrender.com/api/
//!    BLOGC_STORAGE_BACKEND=file
//!    BLOGC_USERNAME=ada
//!    BLOGC_PASSWORD=secret
//!    ```
//!
//! 2. Run this example: `cargo run -p blogc-infra --example blog_session`
//!
//! Set `RUST_LOG=blogc_infra=debug` to watch credential attachment and
//! refresh decisions.

use blogc_domain::{media, Config, DashboardStats, LoginRequest, PostQuery};
use blogc_infra::{config, open_session, ApiClient, AuthApi, BlogApi};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "No configuration found, using defaults");
        Config::default()
    });

    let session = open_session(&config.storage)?;
    let client = ApiClient::from_config(&config.api, session)?;
    let auth = AuthApi::new(client.clone());
    let blog = BlogApi::new(client.clone());

    if let (Ok(username), Ok(password)) =
        (std::env::var("BLOGC_USERNAME"), std::env::var("BLOGC_PASSWORD"))
    {
        let login = auth.login(&LoginRequest::new(username, password)).await?;
        println!("Signed in as {} (admin: {})", login.user.display_name(), login.user.is_admin());
    } else if let Some(user) = auth.current_user()? {
        println!("Resuming session of {}", user.display_name());
    } else {
        println!("Browsing anonymously");
    }

    let domain = media::api_domain(client.base_url().as_str());
    let latest = blog.latest_posts().await?;
    println!("\nLatest posts:");
    for post in &latest {
        let image = media::image_url(&domain, post.image.as_deref()).unwrap_or_default();
        println!("  #{:<4} {:<40} {}", post.id, post.title, image);
    }

    let search = std::env::var("BLOGC_SEARCH").ok();
    if search.is_some() {
        let query = PostQuery { search, ordering: Some("-created_at".into()) };
        let found = blog.list_posts(&query).await?;
        println!("\nSearch matched {} posts", found.len());
    }

    if auth.current_user()?.is_some_and(|user| user.is_admin()) {
        let stats = DashboardStats::from_posts(&blog.list_posts(&PostQuery::default()).await?);
        println!(
            "\nDashboard: {} posts ({} published, {} drafts), {} likes, {} comments",
            stats.total_posts, stats.published, stats.drafts, stats.total_likes, stats.total_comments
        );
        for category in &stats.by_category {
            println!("  {:<20} {}", category.name, category.posts);
        }
    }

    Ok(())
}
