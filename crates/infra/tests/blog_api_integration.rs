//! Integration tests for the blog resource wrappers.

use blogc_domain::{CategoryDraft, ImageUpload, PostDraft, PostQuery};
use blogc_infra::BlogApi;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;

use support::{client, comment_json, post_json, requests_to, seeded_store};

fn blog(server: &MockServer) -> BlogApi {
    BlogApi::new(client(server, seeded_store(Some("A1"), Some("R1"))))
}

// --- Posts ---

/// Validates that search and ordering reach the backend as query parameters.
#[tokio::test]
async fn list_posts_sends_search_and_ordering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/"))
        .and(query_param("search", "rust async"))
        .and(query_param("ordering", "-created_at"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(1, "Async Rust", true)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = PostQuery {
        search: Some("rust async".into()),
        ordering: Some("-created_at".into()),
    };
    let posts = blog(&server).list_posts(&query).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Async Rust");
    assert_eq!(posts[0].author.username, "ada");
}

/// Validates that an empty query sends no parameters.
#[tokio::test]
async fn list_posts_without_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    blog(&server).list_posts(&PostQuery::default()).await.unwrap();

    let requests = requests_to(&server, "/v1/posts/").await;
    assert_eq!(requests[0].url.query(), None);
}

/// Validates that a non-list body from a list endpoint yields no posts.
#[tokio::test]
async fn list_endpoint_tolerates_non_list_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/latest/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "maintenance" })))
        .mount(&server)
        .await;

    assert!(blog(&server).latest_posts().await.unwrap().is_empty());
}

/// Validates that list endpoints still propagate HTTP errors.
#[tokio::test]
async fn list_endpoint_propagates_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/my-posts/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = blog(&server).my_posts().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
}

#[tokio::test]
async fn get_post_decodes_detail_with_comments() {
    let server = MockServer::start().await;
    let mut detail = post_json(42, "Hello", true);
    detail["comments"] = json!([comment_json(3, 42, "first!")]);
    detail["updated_at"] = json!("2025-08-16T09:00:00Z");
    Mock::given(method("GET"))
        .and(path("/v1/posts/42/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .mount(&server)
        .await;

    let post = blog(&server).get_post(42).await.unwrap();

    assert_eq!(post.id, 42);
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].body, "first!");
    assert!(post.updated_at.is_some());
}

/// Validates that a post draft is sent as a multipart form.
#[tokio::test]
async fn create_post_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "title": "Draft",
            "content": "Work in progress",
            "image": "/media/post_images/cover.png",
            "published": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = PostDraft {
        title: "Draft".into(),
        content: "Work in progress".into(),
        category_id: 2,
        published: false,
        image: Some(ImageUpload {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![137, 80, 78, 71],
        }),
    };
    let created = blog(&server).create_post(&draft).await.unwrap();

    assert_eq!(created.id, 11);
    assert!(!created.published);

    let request = &requests_to(&server, "/v1/posts/").await[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    for field in ["title", "content", "category_id", "published", "image"] {
        assert!(body.contains(&format!("name=\"{field}\"")), "missing field {field}");
    }
    assert!(body.contains("false"));
    assert!(body.contains("Content-Type: image/png") || body.contains("content-type: image/png"));
}

#[tokio::test]
async fn update_post_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/posts/11/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11,
            "title": "Final",
            "published": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = PostDraft {
        title: "Final".into(),
        content: "Done".into(),
        category_id: 2,
        published: true,
        image: None,
    };
    let updated = blog(&server).update_post(11, &draft).await.unwrap();

    assert!(updated.published);
}

/// Validates that an empty 204 body is accepted for deletions.
#[tokio::test]
async fn delete_post_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/posts/11/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    blog(&server).delete_post(11).await.unwrap();
}

// --- Categories ---

#[tokio::test]
async fn category_listing_and_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Rust", "title": "Rust", "slug": "rust" },
            { "id": 2, "name": "Go", "slug": "go" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/categories/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Rust",
            "slug": "rust",
            "total_posts": 1,
            "total_comments": 4,
            "total_likes": 9,
            "posts": [post_json(5, "Ownership", true)]
        })))
        .mount(&server)
        .await;

    let api = blog(&server);
    let categories = api.list_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].title, None);

    let detail = api.get_category(1).await.unwrap();
    assert_eq!(detail.total_likes, 9);
    assert_eq!(detail.posts[0].title, "Ownership");
}

/// Validates that administrative writes use the admin routes.
#[tokio::test]
async fn category_admin_routes() {
    let server = MockServer::start().await;
    let draft = CategoryDraft { name: "Systems".into(), slug: "systems".into() };
    let created = json!({ "id": 8, "name": "Systems", "slug": "systems" });

    Mock::given(method("POST"))
        .and(path("/v1/categories/"))
        .and(body_json(json!({ "name": "Systems", "slug": "systems" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/admin/categories/8/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/admin/categories/8/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = blog(&server);
    assert_eq!(api.create_category(&draft).await.unwrap().id, 8);
    assert_eq!(api.update_category(8, &draft).await.unwrap().slug, "systems");
    api.delete_category(8).await.unwrap();
}

// --- Likes ---

#[tokio::test]
async fn toggle_like_reports_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts/42/like-toggle/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "liked" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/posts/42/like-toggle/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "unliked" })))
        .mount(&server)
        .await;

    let api = blog(&server);
    assert!(api.toggle_like(42).await.unwrap().is_liked());
    assert!(!api.toggle_like(42).await.unwrap().is_liked());
}

// --- Comments ---

/// Validates that comments decode from a bare list and from both envelopes.
#[tokio::test]
async fn list_comments_accepts_envelopes() {
    let server = MockServer::start().await;
    let bodies = [
        (1, json!([comment_json(1, 1, "bare")])),
        (2, json!({ "results": [comment_json(2, 2, "paged")] })),
        (3, json!({ "comments": [comment_json(3, 3, "wrapped")] })),
        (4, json!({ "detail": "nothing here" })),
    ];
    for (post, body) in &bodies {
        Mock::given(method("GET"))
            .and(path(format!("/v1/posts/{post}/comments/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    let api = blog(&server);
    assert_eq!(api.list_comments(1).await.unwrap()[0].body, "bare");
    assert_eq!(api.list_comments(2).await.unwrap()[0].body, "paged");
    assert_eq!(api.list_comments(3).await.unwrap()[0].body, "wrapped");
    assert!(api.list_comments(4).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_writes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts/42/comments/"))
        .and(body_json(json!({ "body": "Nice post" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(9, 42, "Nice post")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/comments/9/"))
        .and(body_json(json!({ "body": "Nice post!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(9, 42, "Nice post!")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/comments/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = blog(&server);
    assert_eq!(api.add_comment(42, "Nice post").await.unwrap().id, 9);
    assert_eq!(api.update_comment(9, "Nice post!").await.unwrap().body, "Nice post!");
    api.delete_comment(9).await.unwrap();
}
