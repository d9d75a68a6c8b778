// SPDX-License-Identifier: MIT

//! dj-rest-auth endpoints: sign-in/out, registration, silent refresh,
//! account details and password change.
//!
//! These are the only flows allowed to write the session.

use super::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{
    CurrentUser, LoginRequest, LoginResponse, PasswordChangeRequest, RegistrationRequest,
};
use serde::Serialize;
use validator::Validate;

impl ApiClient {
    /// Sign in and establish the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<CurrentUser> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .post_json_anonymous("dj-rest-auth/login/", &request)
            .await?;
        self.session().establish(&response);
        Ok(response.user)
    }

    /// Sign out. Local state is cleared even when the server call
    /// fails — sign-out must always leave the client anonymous.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .post_no_content("dj-rest-auth/logout/", &serde_json::json!({}))
            .await;
        self.session().clear();
        result
    }

    /// Register a new account. Does not sign in; the platform sends the
    /// user to the sign-in form afterwards.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<()> {
        validate_payload(request)?;
        if request.password1 != request.password2 {
            return Err(field_error("password2", "Passwords do not match."));
        }

        self.post_no_content_anonymous("dj-rest-auth/registration/", request)
            .await
    }

    /// App-start silent refresh: resume the persisted session if its
    /// timestamp is still fresh, otherwise stay anonymous.
    ///
    /// Returns the restored user, or `None` for an anonymous start. A
    /// stale persisted timestamp is cleared without any network call.
    pub async fn bootstrap_session(&self) -> Result<Option<CurrentUser>> {
        if self.session().restore_persisted().is_none() {
            return Ok(None);
        }

        if let Err(err) = self.refresh_access().await {
            tracing::info!(error = %err, "Silent refresh failed, starting anonymous");
            self.session().clear();
            return Ok(None);
        }

        match self.fetch_current_user().await {
            Ok(user) => {
                self.session().set_user(user.clone());
                Ok(Some(user))
            }
            Err(err) => {
                tracing::info!(error = %err, "Could not load account after refresh, starting anonymous");
                self.session().clear();
                Ok(None)
            }
        }
    }

    /// `GET dj-rest-auth/user/`
    pub async fn fetch_current_user(&self) -> Result<CurrentUser> {
        self.get_json("dj-rest-auth/user/").await
    }

    /// `PUT dj-rest-auth/user/` — change the account's username. The
    /// session identity is updated on success.
    pub async fn change_username(&self, username: &str) -> Result<CurrentUser> {
        #[derive(Serialize)]
        struct UsernameUpdate<'a> {
            username: &'a str,
        }

        let user: CurrentUser = self
            .put_json("dj-rest-auth/user/", &UsernameUpdate { username })
            .await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// `POST dj-rest-auth/password/change/`
    pub async fn change_password(&self, request: &PasswordChangeRequest) -> Result<()> {
        validate_payload(request)?;
        if request.new_password1 != request.new_password2 {
            return Err(field_error("new_password2", "Passwords do not match."));
        }

        self.post_no_content("dj-rest-auth/password/change/", request)
            .await
    }
}

/// Run derive-level validation, converting failures into the same
/// field-keyed shape the API uses so they render identically.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
    let report = match payload.validate() {
        Ok(()) => return Ok(()),
        Err(report) => report,
    };

    let mut fields = crate::error::FieldErrors::new();
    for (field, errors) in report.field_errors() {
        let messages = errors
            .iter()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}."))
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    Err(ApiError::Validation(fields))
}

pub(crate) fn field_error(field: &str, message: &str) -> ApiError {
    let mut fields = crate::error::FieldErrors::new();
    fields.insert(field.to_string(), vec![message.to_string()]);
    ApiError::Validation(fields)
}
