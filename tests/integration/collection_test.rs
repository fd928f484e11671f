//! Integration tests for collection CRUD and ownership.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn names(body: &Value) -> Vec<String> {
    body["collections"]
        .as_array()
        .expect("collections array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_and_get_collection() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/collections",
            Some(json!({ "name": "  Sci-fi  ", "description": "Space", "owner": 99 })),
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let collection = &response.body["collection"];
    assert_eq!(collection["name"], "Sci-fi");
    assert_eq!(collection["description"], "Space");
    assert_eq!(collection["is_public"], false);

    let id = collection["id"].as_i64().expect("id");
    let fetched = app
        .request("GET", &format!("/api/collections/{id}"), None, Some(&session))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["collection"]["name"], "Sci-fi");
}

#[tokio::test]
async fn test_create_collection_validation() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;

    let missing = app
        .request(
            "POST",
            "/api/collections",
            Some(json!({ "name": "   " })),
            Some(&session),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "Missing required fields: name");

    let long = app
        .request(
            "POST",
            "/api/collections",
            Some(json!({ "name": "x".repeat(201) })),
            Some(&session),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);

    for falsy in [json!(false), json!(0)] {
        let response = app
            .request(
                "POST",
                "/api/collections",
                Some(json!({ "name": falsy })),
                Some(&session),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{falsy}");
        assert_eq!(response.body["error"], "Missing required fields: name");
    }

    let boolean = app
        .request(
            "POST",
            "/api/collections",
            Some(json!({ "name": true })),
            Some(&session),
        )
        .await;
    assert_eq!(boolean.status, StatusCode::BAD_REQUEST);
    assert_eq!(boolean.body["error"], "name must be a string");

    let listing = app.request("GET", "/api/collections", None, Some(&session)).await;
    assert!(names(&listing.body).is_empty());
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    app.create_collection(&session, "beta reads").await;
    app.create_collection(&session, "Alpha").await;
    app.request(
        "POST",
        "/api/collections",
        Some(json!({ "name": "Gamma", "description": "mostly BETA releases" })),
        Some(&session),
    )
    .await;

    let newest_first = app
        .request("GET", "/api/collections", None, Some(&session))
        .await;
    assert_eq!(names(&newest_first.body), ["Gamma", "Alpha", "beta reads"]);

    let by_name = app
        .request("GET", "/api/collections?sort=name", None, Some(&session))
        .await;
    assert_eq!(names(&by_name.body), ["Alpha", "beta reads", "Gamma"]);

    let filtered = app
        .request("GET", "/api/collections?q=beta&sort=name", None, Some(&session))
        .await;
    assert_eq!(names(&filtered.body), ["beta reads", "Gamma"]);

    let unknown_sort = app
        .request("GET", "/api/collections?sort=bogus", None, Some(&session))
        .await;
    assert_eq!(unknown_sort.status, StatusCode::OK);
    assert_eq!(names(&unknown_sort.body), ["Gamma", "Alpha", "beta reads"]);
}

#[tokio::test]
async fn test_list_only_shows_own_collections() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    app.create_collection(&alice, "Alice's").await;

    let response = app.request("GET", "/api/collections", None, Some(&bob)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(names(&response.body).is_empty());
}

#[tokio::test]
async fn test_other_user_gets_not_found() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    let id = app.create_collection(&alice, "Private").await;
    let path = format!("/api/collections/{id}");

    let get = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.body["error"], "Resource not found or access denied");
    assert!(get.body.get("collection").is_none());

    let put = app
        .request("PUT", &path, Some(json!({ "name": "Mine" })), Some(&bob))
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let still_there = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(still_there.body["collection"]["name"], "Private");
}

#[tokio::test]
async fn test_missing_collection_matches_foreign_one() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;

    let response = app
        .request("GET", "/api/collections/424242", None, Some(&session))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Resource not found or access denied");
}

#[tokio::test]
async fn test_invalid_collection_id() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;

    for raw in ["abc", "0", "-3"] {
        let response = app
            .request("GET", &format!("/api/collections/{raw}"), None, Some(&session))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{raw}");
        assert_eq!(
            response.body["error"],
            "Invalid collection_id: must be a positive integer"
        );
    }
}

#[tokio::test]
async fn test_update_collection_partially() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let id = app.create_collection(&session, "Draft").await;
    let path = format!("/api/collections/{id}");

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "description": "Notes", "is_public": true })),
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["collection"]["name"], "Draft");
    assert_eq!(response.body["collection"]["description"], "Notes");
    assert_eq!(response.body["collection"]["is_public"], true);

    let empty_name = app
        .request("PUT", &path, Some(json!({ "name": "" })), Some(&session))
        .await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_name.body["error"], "name cannot be empty");

    let no_changes = app.request("PUT", &path, Some(json!({})), Some(&session)).await;
    assert_eq!(no_changes.status, StatusCode::OK);
    assert_eq!(no_changes.body["collection"]["name"], "Draft");
}

#[tokio::test]
async fn test_delete_collection_cascades() {
    let app = TestApp::new();
    let session = app.signed_in("alice@example.com").await;
    let id = app.create_collection(&session, "Doomed").await;
    let resource = app
        .create_resource(&session, id, json!({ "title": "Orphan candidate" }))
        .await;
    let resource_id = resource["id"].as_i64().expect("resource id");

    let response = app
        .request("DELETE", &format!("/api/collections/{id}"), None, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "deleted");

    let listing = app
        .request(
            "GET",
            &format!("/api/collections/{id}/resources"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(listing.status, StatusCode::NOT_FOUND);

    let orphan = app
        .request(
            "GET",
            &format!("/api/resources/{resource_id}"),
            None,
            Some(&session),
        )
        .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}
