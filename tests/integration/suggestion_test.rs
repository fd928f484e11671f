//! Integration tests for metadata suggestions against a local upstream.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[derive(Clone)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<String>>>,
    status: StatusCode,
    body: Value,
}

async fn search(
    State(upstream): State<Upstream>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> impl IntoResponse {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    *upstream.last_query.lock().expect("query lock") = params.get("q").cloned();
    (upstream.status, axum::Json(upstream.body.clone()))
}

async fn start_upstream(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
    let (base, upstream) = start_recording_upstream(status, body).await;
    (base, upstream.hits)
}

async fn start_recording_upstream(status: StatusCode, body: Value) -> (String, Upstream) {
    let state = Upstream {
        hits: Arc::new(AtomicUsize::new(0)),
        last_query: Arc::new(Mutex::new(None)),
        status,
        body,
    };
    let recorder = state.clone();
    let app = Router::new()
        .route("/search.json", get(search))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });

    (format!("http://{addr}"), recorder)
}

fn app_for(base_url: String) -> TestApp {
    TestApp::with_config(|config| config.suggestions.base_url = base_url)
}

#[tokio::test]
async fn test_suggestions_map_upstream_docs() {
    let (base, hits) = start_upstream(
        StatusCode::OK,
        json!({
            "docs": [
                {
                    "title": "Dune",
                    "author_name": ["Frank Herbert"],
                    "first_publish_year": 1965,
                    "isbn": ["9780441013593", "0441013597"]
                },
                { "title_suggest": "Dune Messiah", "author_name": ["Frank Herbert", "Someone Else"] },
                { "title": "Children of Dune" }
            ]
        }),
    )
    .await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=dune&limit=2", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["query"], "dune");
    assert_eq!(
        response.body["suggestions"],
        json!([
            { "title": "Dune", "authors": "Frank Herbert", "year": 1965, "isbn": "9780441013593" },
            { "title": "Dune Messiah", "authors": "Frank Herbert, Someone Else", "year": null, "isbn": null }
        ])
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_query_skips_upstream() {
    let (base, hits) = start_upstream(StatusCode::OK, json!({ "docs": [] })).await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=%20%20", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["suggestions"], json!([]));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_matches_is_empty_list() {
    let (base, _hits) = start_upstream(StatusCode::OK, json!({ "docs": [] })).await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=zzzz&limit=abc", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["suggestions"], json!([]));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let (base, _hits) =
        start_upstream(StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "down" })).await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=dune", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "failed to fetch suggestions");
    assert!(response.body["details"].is_string());
}

#[tokio::test]
async fn test_malformed_upstream_body_is_bad_gateway() {
    let (base, _hits) = start_upstream(StatusCode::OK, json!(["not", "an", "object"])).await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=dune", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_query_is_forwarded_verbatim() {
    let (base, upstream) = start_recording_upstream(StatusCode::OK, json!({ "docs": [] })).await;
    let app = app_for(base);

    let response = app
        .request("GET", "/api/suggestions?q=%20Ender%27s%20%22Game%22%20", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["query"], "Ender's \"Game\"");
    assert_eq!(
        upstream.last_query.lock().expect("query lock").as_deref(),
        Some("Ender's \"Game\"")
    );
}
