// SPDX-License-Identifier: MIT

//! User-facing notification queue.
//!
//! Page flows push a notice for every outcome a user should see
//! (success confirmations, validation warnings, remote failures); the
//! embedding UI drains the queue and renders toasts. Remote failures
//! always produce a notice, nothing is dropped silently.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Notice severity, mapped by the UI to toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// One user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Shared notice queue. Cloning hands out another handle to the same queue.
#[derive(Clone, Default)]
pub struct Notices {
    inner: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn push(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?severity, %message, "notice");
        if let Ok(mut queue) = self.inner.lock() {
            queue.push_back(Notice { severity, message });
        }
    }

    /// Take all pending notices, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        match self.inner.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().map(|queue| queue.is_empty()).unwrap_or(true)
    }
}
