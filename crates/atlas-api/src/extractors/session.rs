//! `AuthUser` and `PageUser` extractors: pull the session token from its
//! cookie, verify it and load the principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use atlas_core::config::AuthConfig;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying a one-shot notice for the next rendered page.
pub const FLASH_COOKIE: &str = "atlas_flash";

/// Flash code set when a protected page bounces to login.
pub const FLASH_LOGIN_REQUIRED: &str = "login_required";

/// Authenticated principal for API handlers. Missing or invalid sessions
/// are rejected with 401 JSON.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(AuthUser(resolve(&jar, state).await?))
    }
}

/// Authenticated principal for page handlers. Anonymous visitors are
/// redirected to the login page with a flash notice.
#[derive(Debug, Clone)]
pub struct PageUser(pub RequestContext);

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match resolve(&jar, state).await {
            Ok(ctx) => Ok(PageUser(ctx)),
            Err(e) => {
                tracing::debug!(path = %parts.uri.path(), reason = %e.message, "Page requires login");
                Err(login_redirect(jar, parts.uri.path()))
            }
        }
    }
}

async fn resolve(jar: &CookieJar, state: &AppState) -> AppResult<RequestContext> {
    let token = jar
        .get(state.cookie_name())
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::authentication("authentication required"))?;

    state.auth.authenticate(token).await
}

fn login_redirect(jar: CookieJar, path: &str) -> Response {
    let location = format!("/login?next={path}");
    let jar = match flash_cookie(FLASH_LOGIN_REQUIRED) {
        Ok(cookie) => jar.add(cookie),
        Err(_) => jar,
    };
    (StatusCode::FOUND, jar, [(header::LOCATION, location)]).into_response()
}

/// The session cookie: HttpOnly, SameSite=Lax, scoped to `/`, expiring
/// with the token.
pub fn session_cookie(
    config: &AuthConfig,
    token: String,
    max_age_seconds: i64,
) -> AppResult<Cookie<'static>> {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    Cookie::parse(format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}{secure}",
        config.cookie_name
    ))
    .map_err(|e| AppError::internal(format!("Failed to build session cookie: {e}")))
}

/// A short-lived flash cookie carrying `code`.
pub fn flash_cookie(code: &str) -> AppResult<Cookie<'static>> {
    Cookie::parse(format!(
        "{FLASH_COOKIE}={code}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
    ))
    .map_err(|e| AppError::internal(format!("Failed to build flash cookie: {e}")))
}

/// A cookie that, once added to a jar, removes `name` on the client.
pub fn removal(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), "")).path("/").build()
}
