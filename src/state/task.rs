// SPDX-License-Identifier: MIT

//! Background work bound to a view's lifetime.
//!
//! List fetches started by a page must not update state after the page
//! is torn down; dropping the task aborts the underlying future at its
//! next suspension point.

use futures_util::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;
use tokio::task::JoinHandle;

/// A spawned load whose lifetime is tied to the owning view.
///
/// Aborts on drop; [`ViewTask::join`] yields `None` when the task was
/// aborted (or panicked) instead of completing.
#[derive(Debug)]
pub struct ViewTask<T> {
    handle: Option<JoinHandle<std::result::Result<T, Aborted>>>,
    abort: AbortHandle,
}

impl<T: Send + 'static> ViewTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        let handle = tokio::spawn(Abortable::new(future, registration));
        Self {
            handle: Some(handle),
            abort,
        }
    }

    /// Abort without waiting. Idempotent; harmless after completion.
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }

    /// Wait for the result; `None` if the task was aborted.
    pub async fn join(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        match handle.await {
            Ok(Ok(value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
