use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// 5 to 20 characters, surrounding whitespace ignored
    #[validate(length(min = 5, max = 20, message = "Username must be 5-20 characters."))]
    pub username: String,
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Please choose a password."))]
    pub password: String,
}

impl RegisterRequest {
    /// Copy with username and email trimmed, the form the rules apply to.
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session handle returned on login. Send it back as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub home_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserDto {
    pub username: String,
    pub email: String,
}
