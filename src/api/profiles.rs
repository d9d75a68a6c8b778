// SPDX-License-Identifier: MIT

//! Profiles and followers endpoints.

use super::client::{ApiClient, FormValue, ImageUpload};
use crate::error::Result;
use crate::models::{FollowRequest, Follower, Profile, ProfileUpdate};

impl ApiClient {
    /// `GET /profiles/{id}/`
    pub async fn get_profile(&self, id: u64) -> Result<Profile> {
        self.get_json(&format!("profiles/{id}/")).await
    }

    /// `PUT /profiles/{id}/` — multipart, optionally carrying a new avatar.
    pub async fn update_profile(
        &self,
        id: u64,
        update: &ProfileUpdate,
        image: Option<ImageUpload>,
    ) -> Result<Profile> {
        let mut parts = vec![
            ("name".to_string(), FormValue::Text(update.name.clone())),
            (
                "content".to_string(),
                FormValue::Text(update.content.clone()),
            ),
        ];
        if let Some(upload) = image {
            parts.push(("image".to_string(), FormValue::Image(upload)));
        }

        self.put_multipart(&format!("profiles/{id}/"), parts).await
    }

    /// `POST /followers/`
    pub async fn follow_profile(&self, profile_id: u64) -> Result<Follower> {
        self.post_json(
            "followers/",
            &FollowRequest {
                followed: profile_id,
            },
        )
        .await
    }

    /// `DELETE /followers/{id}/`
    pub async fn unfollow(&self, follower_id: u64) -> Result<()> {
        self.delete(&format!("followers/{follower_id}/")).await
    }
}
