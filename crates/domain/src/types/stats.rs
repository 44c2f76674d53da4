//! Admin dashboard aggregates computed client-side from the post list

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::blog::PostSummary;

/// Post count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub posts: u64,
}

/// Totals shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub published: u64,
    pub drafts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// Sorted by category name; uncategorized posts are not listed
    pub by_category: Vec<CategoryCount>,
}

impl DashboardStats {
    #[must_use]
    pub fn from_posts(posts: &[PostSummary]) -> Self {
        let mut stats = Self::default();
        let mut by_category: BTreeMap<&str, u64> = BTreeMap::new();

        for post in posts {
            stats.total_posts += 1;
            if post.published {
                stats.published += 1;
            } else {
                stats.drafts += 1;
            }
            stats.total_likes += post.likes_count;
            stats.total_comments += post.comments_count;
            if let Some(category) = &post.category {
                *by_category.entry(category.name.as_str()).or_default() += 1;
            }
        }

        stats.by_category = by_category
            .into_iter()
            .map(|(name, posts)| CategoryCount { name: name.to_string(), posts })
            .collect();
        stats
    }
}
