//! Blog resource API
//!
//! Pass-through wrappers over [`ApiClient`] for posts, categories, comments
//! and likes. List endpoints tolerate bodies that are not lists by returning
//! an empty list; HTTP and transport errors still propagate.

use blogc_domain::constants::{ADMIN_CATEGORIES_PATH, CATEGORIES_PATH, COMMENTS_PATH, POSTS_PATH};
use blogc_domain::{
    Category, CategoryDetail, CategoryDraft, Comment, LikeToggle, PostDetail, PostDraft,
    PostQuery, PostSummary, PostWriteResult,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::{ApiRequest, MultipartForm};
use super::response::ApiResponse;

/// Posts, categories, comments and likes
#[derive(Clone, Debug)]
pub struct BlogApi {
    client: ApiClient,
}

impl BlogApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // --- Posts ---

    #[instrument(skip(self))]
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Vec<PostSummary>, ApiError> {
        let request = query
            .pairs()
            .into_iter()
            .fold(ApiRequest::get(POSTS_PATH), |request, (name, value)| request.query(name, value));

        list_body(&self.client.send(request).await?)
    }

    pub async fn latest_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        list_body(&self.client.get(&format!("{POSTS_PATH}latest/")).await?)
    }

    /// Posts authored by the signed-in user, drafts included.
    pub async fn my_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        list_body(&self.client.get(&format!("{POSTS_PATH}my-posts/")).await?)
    }

    pub async fn get_post(&self, id: i64) -> Result<PostDetail, ApiError> {
        self.client.get_json(&post_path(id)).await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_post(&self, draft: &PostDraft) -> Result<PostWriteResult, ApiError> {
        self.client.post_multipart(POSTS_PATH, post_form(draft)).await?.json()
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn update_post(
        &self,
        id: i64,
        draft: &PostDraft,
    ) -> Result<PostWriteResult, ApiError> {
        self.client.put_multipart(&post_path(id), post_form(draft)).await?.json()
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&post_path(id)).await?;
        Ok(())
    }

    // --- Categories ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        list_body(&self.client.get(CATEGORIES_PATH).await?)
    }

    /// Category with its aggregate counters and posts.
    pub async fn get_category(&self, id: i64) -> Result<CategoryDetail, ApiError> {
        self.client.get_json(&format!("{CATEGORIES_PATH}{id}/")).await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        self.client.post_json(CATEGORIES_PATH, draft).await?.json()
    }

    pub async fn update_category(
        &self,
        id: i64,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        self.client.put_json(&format!("{ADMIN_CATEGORIES_PATH}{id}/"), draft).await?.json()
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{ADMIN_CATEGORIES_PATH}{id}/")).await?;
        Ok(())
    }

    // --- Likes ---

    pub async fn toggle_like(&self, post_id: i64) -> Result<LikeToggle, ApiError> {
        let request = ApiRequest::post(format!("{}like-toggle/", post_path(post_id)));
        self.client.send(request).await?.json()
    }

    // --- Comments ---

    /// Comments of a post. Accepts a bare list or a `results`/`comments`
    /// envelope.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let response = self.client.get(&comments_path(post_id)).await?;
        let body: Value = response.json()?;

        let list = match body {
            Value::Array(_) => body,
            Value::Object(mut map) => ["results", "comments"]
                .iter()
                .find_map(|key| map.remove(*key).filter(Value::is_array))
                .unwrap_or(Value::Array(Vec::new())),
            _ => Value::Array(Vec::new()),
        };

        decode_list(list, response.url())
    }

    pub async fn add_comment(&self, post_id: i64, body: &str) -> Result<Comment, ApiError> {
        self.client
            .post_json(&comments_path(post_id), &serde_json::json!({ "body": body }))
            .await?
            .json()
    }

    pub async fn update_comment(&self, comment_id: i64, body: &str) -> Result<Comment, ApiError> {
        self.client
            .put_json(&format!("{COMMENTS_PATH}{comment_id}/"), &serde_json::json!({ "body": body }))
            .await?
            .json()
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{COMMENTS_PATH}{comment_id}/")).await?;
        Ok(())
    }
}

fn post_path(id: i64) -> String {
    format!("{POSTS_PATH}{id}/")
}

fn comments_path(post_id: i64) -> String {
    format!("{}comments/", post_path(post_id))
}

fn post_form(draft: &PostDraft) -> MultipartForm {
    let form = MultipartForm::new()
        .text("title", draft.title.clone())
        .text("content", draft.content.clone())
        .text("category_id", draft.category_id.to_string())
        .text("published", draft.published.to_string());

    match &draft.image {
        Some(image) => form.file(
            "image",
            image.file_name.clone(),
            image.content_type.clone(),
            image.bytes.clone(),
        ),
        None => form,
    }
}

fn list_body<T: DeserializeOwned>(response: &ApiResponse) -> Result<Vec<T>, ApiError> {
    let body: Value = response.json()?;
    if body.is_array() {
        decode_list(body, response.url())
    } else {
        debug!(url = response.url(), "List endpoint returned a non-list body");
        Ok(Vec::new())
    }
}

fn decode_list<T: DeserializeOwned>(list: Value, url: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_value(list).map_err(|err| ApiError::Decode(format!("{url}: {err}")))
}

#[cfg(test)]
mod tests {
    use blogc_domain::ImageUpload;

    use super::*;

    fn draft(image: Option<ImageUpload>) -> PostDraft {
        PostDraft {
            title: "Hello".into(),
            content: "World".into(),
            category_id: 3,
            published: true,
            image,
        }
    }

    #[test]
    fn post_form_without_image() {
        let form = post_form(&draft(None));
        assert_eq!(
            form.field_names().collect::<Vec<_>>(),
            vec!["title", "content", "category_id", "published"]
        );
    }

    #[test]
    fn post_form_with_image() {
        let image = ImageUpload {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![137, 80, 78, 71],
        };
        let form = post_form(&draft(Some(image)));
        assert_eq!(form.field_names().last(), Some("image"));
    }

    #[test]
    fn paths_keep_trailing_slash() {
        assert_eq!(post_path(42), "posts/42/");
        assert_eq!(comments_path(42), "posts/42/comments/");
    }
}
