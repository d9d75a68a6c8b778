// SPDX-License-Identifier: MIT

//! Comments endpoints.

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{Comment, CommentCreateRequest, CommentUpdateRequest, Page};

impl ApiClient {
    /// `GET /comments/?post={post_id}` — first page, newest first.
    pub async fn list_comments(&self, post_id: u64) -> Result<Page<Comment>> {
        self.get_json(&format!("comments/?post={post_id}")).await
    }

    /// `POST /comments/`
    pub async fn create_comment(&self, post_id: u64, content: &str) -> Result<Comment> {
        self.post_json(
            "comments/",
            &CommentCreateRequest {
                content: content.to_string(),
                post: post_id,
            },
        )
        .await
    }

    /// `PUT /comments/{id}/`
    pub async fn update_comment(&self, id: u64, content: &str) -> Result<Comment> {
        self.put_json(
            &format!("comments/{id}/"),
            &CommentUpdateRequest {
                content: content.to_string(),
            },
        )
        .await
    }

    /// `DELETE /comments/{id}/`
    pub async fn delete_comment(&self, id: u64) -> Result<()> {
        self.delete(&format!("comments/{id}/")).await
    }
}
