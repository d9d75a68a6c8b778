// SPDX-License-Identifier: MIT

//! Persistence for the resumable part of a session.
//!
//! The browser client keeps a refresh-token timestamp in local storage
//! so a stale session can be invalidated before the server rejects it;
//! a native client additionally has to keep the refresh token itself to
//! resume at all. Store failures are logged and swallowed — a broken
//! session file must never break sign-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// The persisted slice of a session: the refresh token and when it
/// stops being worth presenting to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Where the persisted session lives.
pub trait TokenStore: Send + Sync {
    /// Load the stored session, if one exists and parses.
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: &StoredSession);
    fn clear(&self);
}

/// File-backed store (JSON on disk).
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<StoredSession> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Discarding unreadable session file");
                None
            }
        }
    }

    fn save(&self, session: &StoredSession) {
        let result = serde_json::to_vec_pretty(session)
            .map_err(|err| err.to_string())
            .and_then(|bytes| std::fs::write(&self.path, bytes).map_err(|err| err.to_string()));
        if let Err(err) = result {
            tracing::warn!(path = %self.path.display(), error = %err, "Failed to persist session");
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to clear session file");
            }
        }
    }
}

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredSession> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, session: &StoredSession) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
