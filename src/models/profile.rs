// SPDX-License-Identifier: MIT

//! Profile model and follower payloads.

use super::Identified;
use serde::{Deserialize, Serialize};

/// A user profile with its derived counters.
///
/// `following_id` is the current user's follow of this profile, when
/// one exists; it is what a subsequent unfollow deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    /// Username of the profile's account.
    pub owner: String,
    #[serde(default)]
    pub name: String,
    /// Bio text.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub posts_count: i64,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
    #[serde(default)]
    pub following_id: Option<u64>,
    #[serde(default)]
    pub created_at: String,
}

impl Profile {
    pub fn owned_by(&self, username: Option<&str>) -> bool {
        username == Some(self.owner.as_str())
    }

    /// Record a confirmed follow of this profile.
    pub fn apply_follow(&mut self, follower_id: u64) {
        self.followers_count += 1;
        self.following_id = Some(follower_id);
    }

    /// Record a confirmed unfollow.
    pub fn apply_unfollow(&mut self) {
        self.followers_count -= 1;
        self.following_id = None;
    }
}

impl Identified for Profile {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Editable profile fields; the image travels as a separate multipart part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub content: String,
}

impl From<&Profile> for ProfileUpdate {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            content: profile.content.clone(),
        }
    }
}

/// `POST /followers/`
#[derive(Debug, Clone, Serialize)]
pub struct FollowRequest {
    pub followed: u64,
}

/// A follower record; `id` is what an unfollow deletes.
#[derive(Debug, Clone, Deserialize)]
pub struct Follower {
    pub id: u64,
    pub followed: u64,
}
