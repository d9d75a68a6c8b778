// SPDX-License-Identifier: MIT

//! Paginated list response shape.

use serde::{Deserialize, Serialize};

/// One page of a paginated list endpoint: `{ results, next }`.
///
/// `next` is an opaque locator (a full URL) for the following page, or
/// `None` when the list is exhausted. Appending page N+1 after page N
/// preserves the relative order of page N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> Page<T> {
    /// A single exhausted page, used when an endpoint returns a plain list.
    pub fn single(results: Vec<T>) -> Self {
        Self {
            results,
            next: None,
            previous: None,
            count: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::single(Vec::new())
    }
}
