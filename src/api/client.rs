// SPDX-License-Identifier: MIT

//! HTTP plumbing shared by every endpoint wrapper.
//!
//! Handles:
//! - Bearer-token injection from the session
//! - Proactive access-token refresh before it expires
//! - One refresh-and-retry on a 401 response
//! - Status classification into [`ApiError`] variants

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{Page, RefreshRequest, RefreshResponse};
use crate::session::Session;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// An image selected for upload, sent as a multipart file part.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// One multipart form field. Kept as data (not a built form) so a
/// request can be rebuilt for the 401 retry.
#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    Image(ImageUpload),
}

/// Request body, rebuildable per attempt.
enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormValue)>),
}

/// API client: shared `reqwest::Client`, base URL and session handle.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ─── Public verbs ────────────────────────────────────────────────────────

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.dispatch(Method::GET, &url, &Payload::Empty, true).await?;
        Self::check_json(response, path).await
    }

    /// Follow an opaque page locator returned in a previous `next` field.
    ///
    /// Callers guard against a null locator; this method is never
    /// invoked with one.
    pub async fn fetch_next<T: DeserializeOwned>(&self, next_url: &str) -> Result<Page<T>> {
        let response = self
            .dispatch(Method::GET, next_url, &Payload::Empty, true)
            .await?;
        Self::check_json(response, next_url).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::POST, &url, &payload, true).await?;
        Self::check_json(response, path).await
    }

    /// POST where the response body is irrelevant (e.g. logout).
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::POST, &url, &payload, true).await?;
        Self::check_no_content(response, path).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::PUT, &url, &payload, true).await?;
        Self::check_json(response, path).await
    }

    /// PUT with multipart fields (entity edits that may carry an image).
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<(String, FormValue)>,
    ) -> Result<T> {
        let url = self.url(path);
        let payload = Payload::Multipart(parts);
        let response = self.dispatch(Method::PUT, &url, &payload, true).await?;
        Self::check_json(response, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let response = self
            .dispatch(Method::DELETE, &url, &Payload::Empty, true)
            .await?;
        Self::check_no_content(response, path).await
    }

    // ─── Anonymous verbs (auth endpoints) ────────────────────────────────────

    pub(crate) async fn post_json_anonymous<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::POST, &url, &payload, false).await?;
        Self::check_json(response, path).await
    }

    pub(crate) async fn post_no_content_anonymous<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.url(path);
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::POST, &url, &payload, false).await?;
        Self::check_no_content(response, path).await
    }

    // ─── Token refresh ───────────────────────────────────────────────────────

    /// Exchange the refresh token for a new access token.
    ///
    /// Deliberately bypasses `dispatch` (a refresh must never trigger
    /// another refresh).
    pub(crate) async fn refresh_access(&self) -> Result<()> {
        let refresh = self.session.refresh_token().ok_or(ApiError::Unauthorized)?;
        let url = self.url("dj-rest-auth/token/refresh/");

        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest { refresh })
            .send()
            .await
            .map_err(ApiError::from)?;

        let refreshed: RefreshResponse = Self::check_json(response, "token refresh").await?;
        self.session
            .apply_refreshed(&refreshed.access, refreshed.access_expiration);
        tracing::debug!("Access token refreshed");
        Ok(())
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    fn build(&self, method: &Method, url: &str, payload: &Payload) -> Result<RequestBuilder> {
        let mut request = self.http.request(method.clone(), url);
        match payload {
            Payload::Empty => {}
            Payload::Json(value) => request = request.json(value),
            Payload::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in parts {
                    form = match value {
                        FormValue::Text(text) => form.text(name.clone(), text.clone()),
                        FormValue::Image(upload) => {
                            let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
                                .file_name(upload.filename.clone())
                                .mime_str(&upload.content_type)
                                .map_err(|err| {
                                    ApiError::Internal(anyhow::anyhow!(
                                        "invalid upload content type: {err}"
                                    ))
                                })?;
                            form.part(name.clone(), part)
                        }
                    };
                }
                request = request.multipart(form);
            }
        }
        Ok(request)
    }

    /// Send a request, refreshing the access token around it when needed.
    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        payload: &Payload,
        authorize: bool,
    ) -> Result<Response> {
        if authorize && self.session.needs_access_refresh() {
            // The persisted timestamp says the token is stale; refresh it
            // before the server rejects the request.
            if let Err(err) = self.refresh_access().await {
                tracing::info!(error = %err, "Proactive token refresh failed, clearing session");
                self.session.clear();
            }
        }

        let mut request = self.build(&method, url, payload)?;
        if authorize {
            if let Some(token) = self.session.access_token() {
                request = request.bearer_auth(token);
            }
        }

        let response = request.send().await.map_err(ApiError::from)?;

        if authorize
            && response.status() == StatusCode::UNAUTHORIZED
            && self.session.refresh_token().is_some()
        {
            // One refresh-and-retry; a second 401 propagates as-is.
            match self.refresh_access().await {
                Ok(()) => {
                    let mut retry = self.build(&method, url, payload)?;
                    if let Some(token) = self.session.access_token() {
                        retry = retry.bearer_auth(token);
                    }
                    return retry.send().await.map_err(ApiError::from);
                }
                Err(err) => {
                    tracing::info!(error = %err, "Token refresh failed, signing out");
                    self.session.clear();
                    return Err(ApiError::SessionExpired);
                }
            }
        }

        Ok(response)
    }

    async fn check_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify(status, response, context).await);
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn check_no_content(response: Response, context: &str) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify(status, response, context).await);
        }
        Ok(())
    }

    async fn classify(status: StatusCode, response: Response, context: &str) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), context, "Server error response");
        }
        ApiError::from_status(status.as_u16(), &body, context)
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|err| ApiError::Internal(anyhow::anyhow!(err)))
}
