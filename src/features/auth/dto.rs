use serde::Deserialize;
use validator::Validate;

use super::session::Role;

/// Credentials for the token endpoint.
#[derive(Debug, Validate)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponseDto {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub role: Role,
    pub user_id: i64,
    pub email: String,
}
