// SPDX-License-Identifier: MIT

//! Account identity and dj-rest-auth request/response payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The signed-in account as returned by `dj-rest-auth/user/` and
/// embedded in the login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub pk: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Profile record backing this account.
    #[serde(default)]
    pub profile_id: Option<u64>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// `POST dj-rest-auth/login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: JWT pair plus the signed-in user.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: CurrentUser,
}

/// `POST dj-rest-auth/token/refresh/`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Refresh response; `access_expiration` is present when the server
/// reports the new token's lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub access_expiration: Option<chrono::DateTime<chrono::Utc>>,
}

/// `POST dj-rest-auth/registration/`
///
/// The password-match check is cross-field and lives in the sign-up
/// flow; the derive covers the per-field constraints.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub password1: String,
    pub password2: String,
}

/// `POST dj-rest-auth/password/change/`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PasswordChangeRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub new_password1: String,
    pub new_password2: String,
}
