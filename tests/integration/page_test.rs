//! Integration tests for the HTML pages and the fallback.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, UserId};
use atlas_database::CollectionStore;
use atlas_entity::{Collection, CollectionChanges, CollectionFilter, NewCollection};

use crate::helpers::TestApp;

/// A collection store whose backend is down.
struct UnavailableCollections;

#[async_trait]
impl CollectionStore for UnavailableCollections {
    async fn list_for_user(
        &self,
        _user_id: UserId,
        _filter: &CollectionFilter,
    ) -> AppResult<Vec<Collection>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: CollectionId) -> AppResult<Option<Collection>> {
        Err(AppError::database("connection refused"))
    }

    async fn create(&self, _data: &NewCollection) -> AppResult<Collection> {
        Err(AppError::database("connection refused"))
    }

    async fn update(
        &self,
        _id: CollectionId,
        _changes: &CollectionChanges,
    ) -> AppResult<Option<Collection>> {
        Err(AppError::database("connection refused"))
    }

    async fn delete(&self, _id: CollectionId) -> AppResult<bool> {
        Err(AppError::database("connection refused"))
    }
}

async fn page(app: &TestApp, path: &str, cookies: Option<String>) -> crate::helpers::TestResponse {
    let mut req = Request::builder().method("GET").uri(path);
    if let Some(cookies) = cookies {
        req = req.header(header::COOKIE, cookies);
    }
    app.send(req.body(Body::empty()).expect("Failed to build request"))
        .await
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::new();

    for path in ["/", "/login", "/register", "/faq"] {
        let response = page(&app, path, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert!(response.text.contains("<!doctype html>"), "{path}");
    }
}

#[tokio::test]
async fn test_protected_page_redirects_with_flash() {
    let app = TestApp::new();

    let response = page(&app, "/collections", None).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("/login?next=/collections"));
    let flash = response.cookie("atlas_flash").expect("flash cookie");

    let login = page(&app, "/login?next=/collections", Some(format!("atlas_flash={flash}"))).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.text.contains("Please log in to access this page."));
    assert!(login.text.contains("data-next=\"/collections\""));
    assert_eq!(login.cookie("atlas_flash").as_deref(), Some(""));

    let plain = page(&app, "/login", None).await;
    assert!(!plain.text.contains("Please log in to access this page."));
}

#[tokio::test]
async fn test_login_page_sanitizes_next() {
    let app = TestApp::new();

    let response = page(&app, "/login?next=%22%3E%3Cscript%3E", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.text.contains("<script>"));
}

#[tokio::test]
async fn test_protected_pages_render_for_session() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    let cookie = Some(format!("{}={session}", app.config.auth.cookie_name));

    for path in [
        "/profile".to_string(),
        "/profile/edit".to_string(),
        "/profile/change-password".to_string(),
        "/collections".to_string(),
        "/collections/new".to_string(),
        format!("/collections/{collection_id}"),
        format!("/collections/{collection_id}/edit"),
        format!("/collections/{collection_id}/resources/new"),
    ] {
        let response = page(&app, &path, cookie.clone()).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
    }

    let detail = page(&app, &format!("/collections/{collection_id}"), cookie).await;
    assert!(detail.text.contains("<h1>Shelf</h1>"));
}

#[tokio::test]
async fn test_foreign_collection_page_is_not_found() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    let collection_id = app.create_collection(&alice, "Alice's").await;
    let cookie = Some(format!("{}={bob}", app.config.auth.cookie_name));

    let response = page(&app, &format!("/collections/{collection_id}"), cookie.clone()).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(!response.text.contains("Alice's"));

    let response = page(&app, "/resources/424242/edit", cookie).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_page_id_is_bad_request() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let cookie = Some(format!("{}={session}", app.config.auth.cookie_name));

    let response = page(&app, "/resources/abc/edit", cookie.clone()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text.contains("Invalid resource_id: must be a positive integer"));

    let response = page(&app, "/collections/0/edit", cookie).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_renders_server_error_page() {
    let app = TestApp::with_stores(|stores| stores.collections = Arc::new(UnavailableCollections));
    let session = app.signed_in("alice@example.com").await;
    let cookie = Some(format!("{}={session}", app.config.auth.cookie_name));

    let response = page(&app, "/collections/1", cookie).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text.contains("Something went wrong"));
    assert!(!response.text.contains("connection refused"));
    assert!(!response.text.contains("Page not found"));

    let api = app
        .request("GET", "/api/collections/1", None, Some(&session))
        .await;
    assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(api.body["error"], "internal server error");
}

#[tokio::test]
async fn test_fallback_html_and_json() {
    let app = TestApp::new();

    let html = page(&app, "/no/such/page", None).await;
    assert_eq!(html.status, StatusCode::NOT_FOUND);
    assert!(html.text.contains("Page not found"));

    let json = page(&app, "/api/no-such-endpoint", None).await;
    assert_eq!(json.status, StatusCode::NOT_FOUND);
    assert_eq!(json.body["code"], "NOT_FOUND");
    assert_eq!(json.body["error"], "not found");
}
