mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_generates_six_char_code() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let response = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["originalUrl"], "https://example.com/some/long/path");
    assert_eq!(
        body["shortUrl"],
        format!("{}/{}", common::BASE_URL, code)
    );
    assert_eq!(body["isExpired"], false);
}

#[tokio::test]
async fn test_create_link_with_custom_alias() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let response = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({
            "originalUrl": "https://example.com",
            "customAlias": "my-docs",
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["code"], "my-docs");
}

#[tokio::test]
async fn test_create_link_duplicate_alias_is_alias_taken() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let payload = json!({
        "originalUrl": "https://example.com",
        "customAlias": "my-docs",
    });

    let first = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&payload)
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&payload)
        .await;
    assert_eq!(second.status_code(), 400);
    let body: Value = second.json();
    assert_eq!(body["error"]["code"], "alias_taken");
}

#[tokio::test]
async fn test_create_link_rejects_non_http_url() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    for url in ["javascript:alert(1)", "ftp://example.com/file", "not a url"] {
        let response = server
            .post("/api/links")
            .authorization_bearer(&token)
            .json(&json!({ "originalUrl": url }))
            .await;

        assert_eq!(response.status_code(), 400, "url {url:?} was accepted");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn test_create_link_rejects_bad_alias() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    for alias in ["has space", "api", "héllo"] {
        let response = server
            .post("/api/links")
            .authorization_bearer(&token)
            .json(&json!({
                "originalUrl": "https://example.com",
                "customAlias": alias,
            }))
            .await;

        assert_eq!(response.status_code(), 400, "alias {alias:?} was accepted");
    }
}

#[tokio::test]
async fn test_list_links_paginates_and_counts_clicks() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    for i in 0..3 {
        let response = server
            .post("/api/links")
            .authorization_bearer(&token)
            .json(&json!({
                "originalUrl": format!("https://example.com/page/{i}"),
                "customAlias": format!("page-{i}"),
            }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let link = ctx.store.find_link_by_code("page-1").unwrap();
    ctx.store
        .insert_click(link.id, chrono::Utc::now(), "desktop", "Chrome", "Linux");

    let response = server
        .get("/api/links")
        .add_query_param("page", "1")
        .add_query_param("limit", "2")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["links"].as_array().unwrap().len(), 2);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["totalLinks"], 3);

    let clicked = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["code"] == "page-1")
        .map(|l| l["totalClicks"].clone());
    if let Some(count) = clicked {
        assert_eq!(count, 1);
    }
}

#[tokio::test]
async fn test_list_links_total_pages_for_exact_multiple_and_empty() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let response = server
        .get("/api/links?page=1&limit=2")
        .authorization_bearer(&token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["totalLinks"], 0);

    // 4 links at limit 2 is exactly 2 pages, not 3.
    for i in 0..4 {
        server
            .post("/api/links")
            .authorization_bearer(&token)
            .json(&json!({
                "originalUrl": format!("https://example.com/{i}"),
                "customAlias": format!("exact-{i}"),
            }))
            .await;
    }

    let response = server
        .get("/api/links?page=1&limit=2")
        .authorization_bearer(&token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["totalLinks"], 4);
}

#[tokio::test]
async fn test_list_links_search_filters_by_url_and_code() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    for (alias, url) in [
        ("docs", "https://example.com/documentation"),
        ("blog", "https://example.com/blog"),
    ] {
        server
            .post("/api/links")
            .authorization_bearer(&token)
            .json(&json!({ "originalUrl": url, "customAlias": alias }))
            .await;
    }

    let response = server
        .get("/api/links")
        .add_query_param("search", "DOCS")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["totalLinks"], 1);
    assert_eq!(body["links"][0]["code"], "docs");
}

#[tokio::test]
async fn test_list_links_only_shows_own_links() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);

    let alice = common::register_user(&server, "alice", "alice@example.com").await;
    let bob = common::register_user(&server, "bob", "bob@example.com").await;

    server
        .post("/api/links")
        .authorization_bearer(&alice)
        .json(&json!({ "originalUrl": "https://example.com/a" }))
        .await;

    let response = server.get("/api/links").authorization_bearer(&bob).await;
    let body: Value = response.json();
    assert_eq!(body["totalLinks"], 0);
}

#[tokio::test]
async fn test_update_link_changes_url_and_clears_expiry() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let created: Value = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({
            "originalUrl": "https://example.com/old",
            "expiresAt": "2099-01-01T00:00:00Z",
        }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/links/{id}"))
        .authorization_bearer(&token)
        .json(&json!({
            "originalUrl": "https://example.com/new",
            "expiresAt": null,
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["originalUrl"], "https://example.com/new");
    assert!(body["expiresAt"].is_null());
    // Code never changes on update.
    assert_eq!(body["code"], created["code"]);
}

#[tokio::test]
async fn test_update_someone_elses_link_is_forbidden() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);

    let alice = common::register_user(&server, "alice", "alice@example.com").await;
    let bob = common::register_user(&server, "bob", "bob@example.com").await;

    let created: Value = server
        .post("/api/links")
        .authorization_bearer(&alice)
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/links/{id}"))
        .authorization_bearer(&bob)
        .json(&json!({ "originalUrl": "https://evil.example.com" }))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_update_unknown_link_is_not_found() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let response = server
        .put("/api/links/9999")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_link_removes_it_and_its_clicks() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);
    let token = common::register_user(&server, "alice", "alice@example.com").await;

    let created: Value = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://example.com", "customAlias": "gone" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    ctx.store
        .insert_click(id, chrono::Utc::now(), "desktop", "Chrome", "Linux");

    let response = server
        .delete(&format!("/api/links/{id}"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 204);

    // The code resolves nowhere and the analytics are gone with the link.
    let redirect = server.get("/gone").await;
    assert_eq!(redirect.status_code(), 404);

    let analytics = server
        .get(&format!("/api/links/{id}/analytics"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(analytics.status_code(), 404);
    assert_eq!(ctx.store.click_count(), 0);
}

#[tokio::test]
async fn test_delete_someone_elses_link_is_forbidden() {
    let ctx = common::create_test_state();
    let server = common::test_server(ctx.state);

    let alice = common::register_user(&server, "alice", "alice@example.com").await;
    let bob = common::register_user(&server, "bob", "bob@example.com").await;

    let created: Value = server
        .post("/api/links")
        .authorization_bearer(&alice)
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = server
        .delete(&format!("/api/links/{id}"))
        .authorization_bearer(&bob)
        .await;

    assert_eq!(response.status_code(), 403);
}
