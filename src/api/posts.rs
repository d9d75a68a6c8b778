// SPDX-License-Identifier: MIT

//! Posts and likes endpoints.

use super::client::{ApiClient, FormValue, ImageUpload};
use crate::error::Result;
use crate::models::{Like, LikeRequest, Page, Post, PostUpdate};

/// Query parameters for the posts list.
///
/// `filter` is a raw, pre-encoded query fragment such as
/// `owner__profile=3&` (the feed pages compose these); `search` is
/// encoded here.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub filter: String,
    pub search: String,
}

impl PostQuery {
    fn to_path(&self) -> String {
        format!(
            "posts/?{}search={}",
            self.filter,
            urlencoding::encode(&self.search)
        )
    }
}

impl ApiClient {
    /// `GET /posts/?{filter}search={query}` — first page.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>> {
        self.get_json(&query.to_path()).await
    }

    /// `GET /posts/{id}/`
    pub async fn get_post(&self, id: u64) -> Result<Post> {
        self.get_json(&format!("posts/{id}/")).await
    }

    /// `PUT /posts/{id}/` — multipart, optionally carrying a new image.
    pub async fn update_post(
        &self,
        id: u64,
        update: &PostUpdate,
        image: Option<ImageUpload>,
    ) -> Result<Post> {
        let mut parts = vec![
            ("title".to_string(), FormValue::Text(update.title.clone())),
            (
                "content".to_string(),
                FormValue::Text(update.content.clone()),
            ),
        ];
        if let Some(upload) = image {
            parts.push(("image".to_string(), FormValue::Image(upload)));
        }

        self.put_multipart(&format!("posts/{id}/"), parts).await
    }

    /// `DELETE /posts/{id}/`
    pub async fn delete_post(&self, id: u64) -> Result<()> {
        self.delete(&format!("posts/{id}/")).await
    }

    /// `POST /likes/`
    pub async fn like_post(&self, post_id: u64) -> Result<Like> {
        self.post_json("likes/", &LikeRequest { post: post_id })
            .await
    }

    /// `DELETE /likes/{id}/`
    pub async fn unlike(&self, like_id: u64) -> Result<()> {
        self.delete(&format!("likes/{like_id}/")).await
    }
}
