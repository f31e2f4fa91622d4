//! Account endpoints
//!
//! Signup, login, profile editing and profile retrieval. Request field names
//! are the wire contract. Success and failure bodies are plain text, except
//! for the profile endpoint which returns the user record JSON-encoded.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::error;

use crate::api::middleware::{CurrentUser, SESSION_COOKIE};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::session::{SessionToken, SessionValue, USER_ID_KEY};
use crate::domain::user::{ProfileUpdate, User, UserId};
use crate::infrastructure::user::SignUpData;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/edit", post(edit))
        .route("/profile", get(profile))
}

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile edit request
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub nickname: String,
    pub birthday: String,
    pub introduction: String,
    pub avatar: String,
}

/// Register a new account
///
/// POST /users/signup
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .sign_up(SignUpData {
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
        })
        .await?;

    Ok((StatusCode::OK, "registration succeeded"))
}

/// Log in and establish a session
///
/// POST /users/login
///
/// On success a fresh session token is minted, the user id is stored under
/// it, and the token is returned in the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .accounts
        .login(&request.email, &request.password)
        .await?;

    let token = SessionToken::generate();
    establish_session(&state, &token, user.id()).await?;

    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        "login succeeded",
    ))
}

async fn establish_session(
    state: &AppState,
    token: &SessionToken,
    user_id: UserId,
) -> Result<(), ApiError> {
    state
        .sessions
        .set(token, USER_ID_KEY, SessionValue::Integer(user_id.as_i64()))
        .await
        .map_err(|err| {
            error!(error = %err, "failed to write session");
            ApiError::internal("system error")
        })?;

    state.sessions.save(token).await.map_err(|err| {
        error!(error = %err, "failed to save session");
        ApiError::internal("system error")
    })
}

/// Update the authenticated user's profile
///
/// POST /users/edit
pub async fn edit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<EditRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .update_profile(
            user_id,
            ProfileUpdate {
                nickname: request.nickname,
                birthday: request.birthday,
                introduction: request.introduction,
                avatar: request.avatar,
            },
        )
        .await?;

    Ok((StatusCode::OK, "profile updated"))
}

/// Fetch the authenticated user's profile
///
/// GET /users/profile
pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<User>, ApiError> {
    let user = state.accounts.profile(user_id).await?;
    Ok(Json(user))
}
