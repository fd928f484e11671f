//! Integration tests for resources inside collections.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn titles(body: &Value) -> Vec<String> {
    body["resources"]
        .as_array()
        .expect("resources array")
        .iter()
        .map(|r| r["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_resource_defaults() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;

    let resource = app
        .create_resource(
            &session,
            collection_id,
            json!({ "title": "Dune", "authors": "Frank Herbert, , Brian Herbert " }),
        )
        .await;

    assert_eq!(resource["status"], "Not Started");
    assert_eq!(resource["collection_id"], collection_id);
    assert_eq!(
        resource["authors_list"],
        json!(["Frank Herbert", "Brian Herbert"])
    );
    assert!(resource["url"].is_null());
    assert!(resource["last_read_date"].is_null());
}

#[tokio::test]
async fn test_create_resource_rejects_bogus_status() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;

    let response = app
        .request(
            "POST",
            &format!("/api/collections/{collection_id}/resources"),
            Some(json!({ "title": "Dune", "status": "Bogus" })),
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Invalid status. Valid values: Not Started, In Progress, Paused, Completed"
    );
}

#[tokio::test]
async fn test_create_resource_field_rules() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    let path = format!("/api/collections/{collection_id}/resources");

    let no_title = app
        .request("POST", &path, Some(json!({ "authors": "Anon" })), Some(&session))
        .await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_title.body["error"], "Missing required fields: title");

    let long_title = app
        .request(
            "POST",
            &path,
            Some(json!({ "title": "t".repeat(301) })),
            Some(&session),
        )
        .await;
    assert_eq!(long_title.status, StatusCode::BAD_REQUEST);

    let bad_date = app
        .request(
            "POST",
            &path,
            Some(json!({ "title": "Dune", "last_read_date": "yesterday" })),
            Some(&session),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_resource_in_foreign_collection() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    let collection_id = app.create_collection(&alice, "Alice's").await;

    let response = app
        .request(
            "POST",
            &format!("/api/collections/{collection_id}/resources"),
            Some(json!({ "title": "Planted" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let listing = app
        .request(
            "GET",
            &format!("/api/collections/{collection_id}/resources"),
            None,
            Some(&alice),
        )
        .await;
    assert!(titles(&listing.body).is_empty());
}

#[tokio::test]
async fn test_update_resource_url_gets_scheme() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    let resource = app
        .create_resource(&session, collection_id, json!({ "title": "Essay" }))
        .await;
    let path = format!("/api/resources/{}", resource["id"]);

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "url": "example.com/x" })),
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["resource"]["url"], "https://example.com/x");

    let kept = app
        .request(
            "PUT",
            &path,
            Some(json!({ "url": "http://example.org" })),
            Some(&session),
        )
        .await;
    assert_eq!(kept.body["resource"]["url"], "http://example.org");
}

#[tokio::test]
async fn test_update_resource_partially() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    let resource = app
        .create_resource(
            &session,
            collection_id,
            json!({ "title": "Dune", "authors": "Frank Herbert", "last_read_date": "2024-03-01" }),
        )
        .await;
    assert!(
        resource["last_read_date"]
            .as_str()
            .is_some_and(|d| d.starts_with("2024-03-01"))
    );
    let path = format!("/api/resources/{}", resource["id"]);

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "In Progress", "collection_id": 999 })),
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let updated = &response.body["resource"];
    assert_eq!(updated["status"], "In Progress");
    assert_eq!(updated["title"], "Dune");
    assert_eq!(updated["authors"], "Frank Herbert");
    assert_eq!(updated["collection_id"], collection_id);

    let cleared = app
        .request(
            "PUT",
            &path,
            Some(json!({ "last_read_date": "" })),
            Some(&session),
        )
        .await;
    assert!(cleared.body["resource"]["last_read_date"].is_null());

    let empty_title = app
        .request("PUT", &path, Some(json!({ "title": " " })), Some(&session))
        .await;
    assert_eq!(empty_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_title.body["error"], "title cannot be empty");

    let bogus = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "Bogus" })),
            Some(&session),
        )
        .await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resource_ownership_is_transitive() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    let collection_id = app.create_collection(&alice, "Alice's").await;
    let resource = app
        .create_resource(&alice, collection_id, json!({ "title": "Secret" }))
        .await;
    let path = format!("/api/resources/{}", resource["id"]);

    for method in ["GET", "DELETE"] {
        let response = app.request(method, &path, None, Some(&bob)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(response.body["error"], "Resource not found or access denied");
    }
    let put = app
        .request("PUT", &path, Some(json!({ "title": "Mine" })), Some(&bob))
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let own = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(own.body["resource"]["title"], "Secret");
}

#[tokio::test]
async fn test_invalid_resource_id() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;

    let response = app
        .request("GET", "/api/resources/nope", None, Some(&session))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Invalid resource_id: must be a positive integer"
    );
}

#[tokio::test]
async fn test_list_resources_filters() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    for (title, authors, status) in [
        ("Dune", "Frank Herbert", "Completed"),
        ("anathem", "Neal Stephenson", "In Progress"),
        ("Children of Dune", "Frank Herbert", "Not Started"),
    ] {
        app.create_resource(
            &session,
            collection_id,
            json!({ "title": title, "authors": authors, "status": status }),
        )
        .await;
    }
    let base = format!("/api/collections/{collection_id}/resources");

    let all = app.request("GET", &base, None, Some(&session)).await;
    assert_eq!(titles(&all.body), ["Children of Dune", "anathem", "Dune"]);

    let by_title = app
        .request("GET", &format!("{base}?sort=title"), None, Some(&session))
        .await;
    assert_eq!(titles(&by_title.body), ["anathem", "Children of Dune", "Dune"]);

    let by_status = app
        .request("GET", &format!("{base}?sort=status"), None, Some(&session))
        .await;
    assert_eq!(titles(&by_status.body), ["Children of Dune", "anathem", "Dune"]);

    let completed = app
        .request(
            "GET",
            &format!("{base}?status=Completed"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(titles(&completed.body), ["Dune"]);

    let by_author = app
        .request(
            "GET",
            &format!("{base}?author=herbert&sort=title"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(titles(&by_author.body), ["Children of Dune", "Dune"]);

    let by_text = app
        .request(
            "GET",
            &format!("{base}?q=stephenson"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(titles(&by_text.body), ["anathem"]);

    let bad_status = app
        .request("GET", &format!("{base}?status=Lost"), None, Some(&session))
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_resource() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let collection_id = app.create_collection(&session, "Shelf").await;
    let resource = app
        .create_resource(&session, collection_id, json!({ "title": "Done" }))
        .await;
    let path = format!("/api/resources/{}", resource["id"]);

    let response = app.request("DELETE", &path, None, Some(&session)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "deleted");

    let gone = app.request("GET", &path, None, Some(&session)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
