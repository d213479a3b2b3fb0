use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        password::{hash_password, verify_password},
        repo::User,
        token::JwtKeys,
    },
    error::{ApiError, ApiJson, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    if payload.username.is_empty() {
        warn!("register with empty username");
        return Err(ApiError::Validation("Username is required"));
    }
    if payload.password.is_empty() {
        warn!(username = %payload.username, "register with empty password");
        return Err(ApiError::Validation("Password is required"));
    }

    let hash = hash_password(payload.password).await?;
    let user_id = User::create(&state.db, &payload.username, &hash).await?;

    info!(user_id, username = %payload.username, "user registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if payload.username.is_empty() {
        warn!("login with empty username");
        return Err(ApiError::Validation("Username is required"));
    }
    if payload.password.is_empty() {
        warn!(username = %payload.username, "login with empty password");
        return Err(ApiError::Validation("Password is required"));
    }

    let Some(user) = User::find_by_username(&state.db, &payload.username).await? else {
        warn!(username = %payload.username, "login unknown username");
        return Err(ApiError::Unauthenticated("Invalid credentials"));
    };

    if !verify_password(payload.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, username = %user.username, "login invalid password");
        return Err(ApiError::Unauthenticated("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id, &user.username)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse { access_token }))
}
