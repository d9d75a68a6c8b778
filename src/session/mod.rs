// SPDX-License-Identifier: MIT

//! Process-wide session identity.
//!
//! At most one signed-in user at a time, or none. The session is set on
//! successful sign-in or the app-start silent refresh, and cleared on
//! sign-out or refresh failure. Auth flows are the only writers; every
//! page reads through a cloned handle.

pub mod store;

pub use store::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};

use crate::models::{CurrentUser, LoginResponse};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Margin before access-token expiry when we proactively refresh.
const ACCESS_REFRESH_MARGIN_SECS: i64 = 30;

/// Fallback refresh-token lifetime when the token's `exp` claim cannot
/// be read. Matches the server's default refresh lifetime.
const FALLBACK_REFRESH_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Default)]
struct SessionState {
    user: Option<CurrentUser>,
    access_token: Option<String>,
    access_expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
    refresh_expires_at: Option<DateTime<Utc>>,
}

/// Shared session handle. Cloning is cheap and every clone sees the
/// same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState::default())),
            store,
        }
    }

    /// Session without persistence, for tests and throwaway clients.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read().user.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.read().user.as_ref().map(|user| user.username.clone())
    }

    pub fn profile_id(&self) -> Option<u64> {
        self.read().user.as_ref().and_then(|user| user.profile_id)
    }

    /// Whether the signed-in user is `owner`. False when anonymous.
    pub fn owns(&self, owner: &str) -> bool {
        self.read()
            .user
            .as_ref()
            .map(|user| user.username == owner)
            .unwrap_or(false)
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    /// Whether the access token is missing or about to expire while a
    /// refresh token is still on hand.
    pub fn needs_access_refresh(&self) -> bool {
        let state = self.read();
        if state.refresh_token.is_none() {
            return false;
        }
        match (&state.access_token, state.access_expires_at) {
            (None, _) => true,
            (Some(_), Some(expires_at)) => {
                Utc::now() + Duration::seconds(ACCESS_REFRESH_MARGIN_SECS) >= expires_at
            }
            (Some(_), None) => false,
        }
    }

    // ─── Writes (auth flows only) ────────────────────────────────────────────

    /// Install a fresh identity from a login response and persist the
    /// refresh token with its expiry timestamp.
    pub fn establish(&self, response: &LoginResponse) {
        let refresh_expires_at = jwt_expiry(&response.refresh_token).unwrap_or_else(|| {
            tracing::debug!("Refresh token expiry unreadable, assuming default lifetime");
            Utc::now() + Duration::hours(FALLBACK_REFRESH_LIFETIME_HOURS)
        });

        {
            let mut state = self.write();
            state.user = Some(response.user.clone());
            state.access_token = Some(response.access_token.clone());
            state.access_expires_at = jwt_expiry(&response.access_token);
            state.refresh_token = Some(response.refresh_token.clone());
            state.refresh_expires_at = Some(refresh_expires_at);
        }

        self.store.save(&StoredSession {
            refresh_token: response.refresh_token.clone(),
            refresh_expires_at,
        });

        tracing::info!(username = %response.user.username, "Session established");
    }

    /// Install a refreshed access token.
    pub fn apply_refreshed(&self, access_token: &str, access_expiration: Option<DateTime<Utc>>) {
        let mut state = self.write();
        state.access_expires_at = access_expiration.or_else(|| jwt_expiry(access_token));
        state.access_token = Some(access_token.to_string());
    }

    pub fn set_user(&self, user: CurrentUser) {
        self.write().user = Some(user);
    }

    /// Mutate the signed-in user in place (e.g. after a username or
    /// avatar change). No-op when anonymous.
    pub fn update_user(&self, apply: impl FnOnce(&mut CurrentUser)) {
        if let Some(user) = self.write().user.as_mut() {
            apply(user);
        }
    }

    /// Load the persisted refresh token for the app-start silent
    /// refresh. A stale timestamp invalidates the stored session
    /// immediately, without a network call.
    pub fn restore_persisted(&self) -> Option<StoredSession> {
        let stored = self.store.load()?;
        if stored.refresh_expires_at <= Utc::now() {
            tracing::info!("Stored session expired, clearing");
            self.store.clear();
            return None;
        }

        let mut state = self.write();
        state.refresh_token = Some(stored.refresh_token.clone());
        state.refresh_expires_at = Some(stored.refresh_expires_at);
        Some(stored)
    }

    /// Drop the identity and the persisted timestamp.
    pub fn clear(&self) {
        *self.write() = SessionState::default();
        self.store.clear();
        tracing::info!("Session cleared");
    }
}

/// Read the `exp` claim from a JWT without verifying its signature.
///
/// The client never validates tokens, it only schedules refreshes; the
/// server remains the authority on acceptance.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct Claims {
        exp: i64,
    }

    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}
