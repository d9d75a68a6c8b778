// SPDX-License-Identifier: MIT

//! Feed post model and like payloads.

use super::Identified;
use serde::{Deserialize, Serialize};

/// A feed post with its derived counters.
///
/// `like_id` is the current user's like of this post, when one exists;
/// it is what a subsequent unlike deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    /// Username of the author.
    pub owner: String,
    pub profile_id: u64,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub comments_count: i64,
    pub likes_count: i64,
    #[serde(default)]
    pub like_id: Option<u64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Post {
    /// Whether `username` authored this post.
    pub fn owned_by(&self, username: Option<&str>) -> bool {
        username == Some(self.owner.as_str())
    }

    /// Record a confirmed like: bump the counter and remember the like id.
    pub fn apply_like(&mut self, like_id: u64) {
        self.likes_count += 1;
        self.like_id = Some(like_id);
    }

    /// Record a confirmed unlike.
    pub fn apply_unlike(&mut self) {
        self.likes_count -= 1;
        self.like_id = None;
    }

    /// Adjust the comment counter when a child comment is created or
    /// destroyed elsewhere.
    pub fn adjust_comments(&mut self, delta: i64) {
        self.comments_count += delta;
    }
}

impl Identified for Post {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Editable fields of a post, used by the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

impl From<&Post> for PostUpdate {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }
}

/// `POST /likes/`
#[derive(Debug, Clone, Serialize)]
pub struct LikeRequest {
    pub post: u64,
}

/// A like record; only `id` matters to the client (for unlike).
#[derive(Debug, Clone, Deserialize)]
pub struct Like {
    pub id: u64,
    pub post: u64,
}
