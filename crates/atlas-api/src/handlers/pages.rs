//! Server-rendered page shells.
//!
//! Each page is a minimal HTML document naming the view and the ids it
//! works on; the browser-side UI talks to the JSON API. Protected pages
//! take a [`PageUser`], which bounces anonymous visitors to `/login`.

use axum::Json;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use atlas_core::error::{AppError, ErrorKind};
use atlas_core::types::{CollectionId, ResourceId};
use atlas_core::validation::sanitize_query_param;

use crate::error::{ApiErrorResponse, status_for};
use crate::extractors::PageUser;
use crate::extractors::session::{FLASH_COOKIE, FLASH_LOGIN_REQUIRED, removal};
use crate::state::AppState;

const LOGIN_REQUIRED_NOTICE: &str = "Please log in to access this page.";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn shell(title: &str, view: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Atlas</title></head>\n\
         <body data-view=\"{view}\">\n<main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        view = escape(view),
    ))
}

fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        shell("Page not found", "not-found", "<p>The page you asked for does not exist.</p>"),
    )
        .into_response()
}

/// A failed page request, rendered as an HTML error page.
#[derive(Debug)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let error = self.0;
        match error.kind {
            ErrorKind::NotFound => not_found_page(),
            kind if kind.is_server_error() => {
                tracing::error!(error = %error, "Page rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    shell(
                        "Something went wrong",
                        "error",
                        "<p>The server could not complete your request.</p>",
                    ),
                )
                    .into_response()
            }
            kind => (
                status_for(kind),
                shell(
                    "Request failed",
                    "error",
                    &format!("<p>{}</p>", escape(&error.message)),
                ),
            )
                .into_response(),
        }
    }
}

/// GET /
pub async fn index() -> Html<String> {
    shell(
        "Atlas",
        "index",
        "<p>Track what you read, grouped into collections.</p>",
    )
}

/// Query string of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    next: Option<String>,
}

/// GET /login
///
/// Shows and clears a pending flash notice.
pub async fn login(
    jar: CookieJar,
    Query(params): Query<LoginParams>,
) -> (CookieJar, Html<String>) {
    let notice = jar
        .get(FLASH_COOKIE)
        .filter(|c| c.value() == FLASH_LOGIN_REQUIRED)
        .map(|_| format!("<p class=\"flash\">{LOGIN_REQUIRED_NOTICE}</p>\n"))
        .unwrap_or_default();
    let next = sanitize_query_param(params.next.as_deref(), "/collections", 200);

    let body = format!(
        "{notice}<form method=\"post\" action=\"/api/auth/login\" data-next=\"{}\">\n\
         <input name=\"email\"><input name=\"password\" type=\"password\">\n\
         <button type=\"submit\">Log in</button>\n</form>",
        escape(&next)
    );

    let jar = if jar.get(FLASH_COOKIE).is_some() {
        jar.remove(removal(FLASH_COOKIE))
    } else {
        jar
    };
    (jar, shell("Log in", "login", &body))
}

/// GET /register
pub async fn register() -> Html<String> {
    shell(
        "Create an account",
        "register",
        "<form method=\"post\" action=\"/api/auth/register\">\n\
         <input name=\"email\"><input name=\"username\"><input name=\"password\" type=\"password\">\n\
         <button type=\"submit\">Register</button>\n</form>",
    )
}

/// GET /faq
pub async fn faq() -> Html<String> {
    shell(
        "FAQ",
        "faq",
        "<dl>\n<dt>What is a collection?</dt><dd>A named list of books and articles.</dd>\n\
         <dt>What do the statuses mean?</dt><dd>Not Started, In Progress, Paused and Completed.</dd>\n</dl>",
    )
}

/// GET /profile
pub async fn profile(PageUser(ctx): PageUser) -> Html<String> {
    let name = ctx.user.username.as_deref().unwrap_or(&ctx.user.email);
    shell("Profile", "profile", &format!("<p>Signed in as {}</p>", escape(name)))
}

/// GET /profile/edit
pub async fn profile_edit(_user: PageUser) -> Html<String> {
    shell("Edit profile", "profile-edit", "<form data-api=\"/api/auth/me\"></form>")
}

/// GET /profile/change-password
pub async fn change_password(_user: PageUser) -> Html<String> {
    shell(
        "Change password",
        "change-password",
        "<form data-api=\"/api/auth/change-password\"></form>",
    )
}

/// GET /collections
pub async fn collections(_user: PageUser) -> Html<String> {
    shell("Collections", "collections", "<section data-api=\"/api/collections\"></section>")
}

/// GET /collections/new
pub async fn collection_new(_user: PageUser) -> Html<String> {
    shell("New collection", "collection-new", "<form data-api=\"/api/collections\"></form>")
}

/// GET /collections/{id}
pub async fn collection_detail(
    State(state): State<AppState>,
    PageUser(ctx): PageUser,
    Path(raw): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: CollectionId = raw.parse()?;
    let collection = state.collections.get(&ctx, id).await?;
    Ok(shell(
        &collection.name,
        "collection-detail",
        &format!("<section data-collection-id=\"{id}\"></section>"),
    ))
}

/// GET /collections/{id}/edit
pub async fn collection_edit(
    State(state): State<AppState>,
    PageUser(ctx): PageUser,
    Path(raw): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: CollectionId = raw.parse()?;
    state.collections.get(&ctx, id).await?;
    Ok(shell(
        "Edit collection",
        "collection-edit",
        &format!("<form data-collection-id=\"{id}\"></form>"),
    ))
}

/// GET /collections/{id}/resources/new
pub async fn resource_new(
    State(state): State<AppState>,
    PageUser(ctx): PageUser,
    Path(raw): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: CollectionId = raw.parse()?;
    state.collections.get(&ctx, id).await?;
    Ok(shell(
        "Add resource",
        "resource-new",
        &format!("<form data-collection-id=\"{id}\" data-suggest=\"/api/suggestions\"></form>"),
    ))
}

/// GET /resources/{id}/edit
pub async fn resource_edit(
    State(state): State<AppState>,
    PageUser(ctx): PageUser,
    Path(raw): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: ResourceId = raw.parse()?;
    state.resources.get(&ctx, id).await?;
    Ok(shell(
        "Edit resource",
        "resource-edit",
        &format!("<form data-resource-id=\"{id}\"></form>"),
    ))
}

/// Fallback: JSON 404 under `/api`, an HTML page elsewhere.
pub async fn fallback(OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse {
                error: "not found".to_string(),
                details: None,
                code: "NOT_FOUND".to_string(),
            }),
        )
            .into_response();
    }
    not_found_page()
}
