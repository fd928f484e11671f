//! Auth handlers: register, login, logout, me, change-password.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use atlas_entity::User;
use atlas_service::AuthService;

use crate::dto::response::{MessageResponse, UserMessageResponse};
use crate::error::ApiError;
use crate::extractors::session::{removal, session_cookie};
use crate::extractors::{AuthUser, Payload};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<(StatusCode, Json<UserMessageResponse>), ApiError> {
    let fields = payload.filter(AuthService::REGISTER)?;
    let user = state.auth.register(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            message: "user created",
            user,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Payload,
) -> Result<(CookieJar, Json<UserMessageResponse>), ApiError> {
    let fields = payload.filter(AuthService::LOGIN)?;
    let (user, token) = state.auth.login(fields).await?;

    let cookie = session_cookie(
        &state.config.auth,
        token,
        state.auth.tokens().ttl().num_seconds(),
    )?;

    Ok((
        jar.add(cookie),
        Json(UserMessageResponse {
            message: "logged in",
            user,
        }),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    tracing::info!(user_id = %auth.user_id(), "user logged out");
    (
        jar.remove(removal(state.cookie_name())),
        Json(MessageResponse::new("logged out")),
    )
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.0.user)
}

/// PUT /api/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Payload,
) -> Result<Json<UserMessageResponse>, ApiError> {
    let fields = payload.filter(AuthService::UPDATE_PROFILE)?;
    let user = state.auth.update_profile(&auth, fields).await?;

    Ok(Json(UserMessageResponse {
        message: "profile updated",
        user,
    }))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Payload,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = payload.filter(AuthService::CHANGE_PASSWORD)?;
    state.auth.change_password(&auth, fields).await?;

    Ok(Json(MessageResponse::new("password updated successfully")))
}
