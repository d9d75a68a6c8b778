// SPDX-License-Identifier: MIT

//! Comment model and payloads.

use super::Identified;
use serde::{Deserialize, Serialize};

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    /// Username of the author.
    pub owner: String,
    pub profile_id: u64,
    #[serde(default)]
    pub profile_image: Option<String>,
    /// Parent post id.
    pub post: u64,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Comment {
    pub fn owned_by(&self, username: Option<&str>) -> bool {
        username == Some(self.owner.as_str())
    }
}

impl Identified for Comment {
    fn id(&self) -> u64 {
        self.id
    }
}

/// `POST /comments/`
#[derive(Debug, Clone, Serialize)]
pub struct CommentCreateRequest {
    pub content: String,
    pub post: u64,
}

/// `PUT /comments/{id}/`
#[derive(Debug, Clone, Serialize)]
pub struct CommentUpdateRequest {
    pub content: String,
}
