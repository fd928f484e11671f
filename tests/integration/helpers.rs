//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use atlas_api::{AppState, Stores, build_app};
use atlas_core::config::{AppConfig, StoreProvider};
use atlas_database::MemoryStore;

/// Password that satisfies the registration policy.
pub const PASSWORD: &str = "Passw0rd!";

/// Test application context
pub struct TestApp {
    /// The full Axum app, middleware included
    pub router: Router,
    /// The store behind every repository, for direct inspection
    pub store: Arc<MemoryStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with cheap password hashing.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default config.
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        Self::build(adjust, |_| {})
    }

    /// Create a test application whose store handles can be swapped.
    pub fn with_stores(adjust: impl FnOnce(&mut Stores)) -> Self {
        Self::build(|_| {}, adjust)
    }

    fn build(
        adjust_config: impl FnOnce(&mut AppConfig),
        adjust_stores: impl FnOnce(&mut Stores),
    ) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.secret_key = "integration-test-secret".to_string();
        config.auth.argon2_memory_kib = 8;
        config.auth.argon2_iterations = 1;
        config.auth.argon2_parallelism = 1;
        adjust_config(&mut config);

        let store = Arc::new(MemoryStore::new());
        let mut stores = Stores::memory(store.clone());
        adjust_stores(&mut stores);
        let state = AppState::new(config.clone(), stores).expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Register an account through the API.
    pub async fn register(&self, email: &str, username: Option<&str>) -> TestResponse {
        let mut body = json!({ "email": email, "password": PASSWORD });
        if let Some(username) = username {
            body["username"] = json!(username);
        }
        self.request("POST", "/api/auth/register", Some(body), None)
            .await
    }

    /// Log in and return the session cookie value.
    pub async fn login(&self, identifier: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": identifier, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .cookie(&self.config.auth.cookie_name)
            .expect("No session cookie in login response")
    }

    /// Register and log in a fresh user, returning the session cookie.
    pub async fn signed_in(&self, email: &str) -> String {
        let response = self.register(email, None).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        self.login(email, PASSWORD).await
    }

    /// Create a collection owned by the session holder and return its id.
    pub async fn create_collection(&self, session: &str, name: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/collections",
                Some(json!({ "name": name })),
                Some(session),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["collection"]["id"]
            .as_i64()
            .expect("collection id")
    }

    /// Create a resource in `collection_id` and return its JSON.
    pub async fn create_resource(&self, session: &str, collection_id: i64, body: Value) -> Value {
        let response = self
            .request(
                "POST",
                &format!("/api/collections/{collection_id}/resources"),
                Some(body),
                Some(session),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["resource"].clone()
    }

    /// Make an HTTP request to the test app, optionally carrying a session.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(session) = session {
            req = req.header(
                header::COOKIE,
                format!("{}={}", self.config.auth.cookie_name, session),
            );
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Send a prepared request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` for non-JSON responses
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// Value of the cookie `name` set by this response, if any.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookies()
            .into_iter()
            .filter_map(|raw| {
                let pair = raw.split(';').next()?;
                let (key, value) = pair.split_once('=')?;
                (key.trim() == name).then(|| value.trim().to_string())
            })
            .next()
    }

    /// Every raw `Set-Cookie` header.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}
