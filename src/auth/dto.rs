use serde::{Deserialize, Serialize};

/// Request body for user registration. Missing fields deserialize to empty
/// strings and fail the same non-empty check as explicit empties.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}
