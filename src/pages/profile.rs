// SPDX-License-Identifier: MIT

//! Profile page: the profile header plus the owner's posts, with
//! follow/unfollow reconciliation.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Post, Profile};
use crate::notify::Notices;
use crate::state::Paginator;

/// A profile page, owned by whichever view navigated to it.
pub struct ProfileView {
    client: ApiClient,
    notices: Notices,
    profile: Option<Profile>,
    posts: Paginator<Post>,
    loaded: bool,
}

impl ProfileView {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            profile: None,
            posts: Paginator::new(),
            loaded: false,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.items()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_more_posts(&self) -> bool {
        self.posts.has_more()
    }

    /// Whether the page belongs to the signed-in user.
    pub fn is_own_profile(&self) -> bool {
        self.profile
            .as_ref()
            .map(|profile| profile.owned_by(self.client.session().username().as_deref()))
            .unwrap_or(false)
    }

    /// Load the profile and its posts together.
    pub async fn load(&mut self, profile_id: u64) -> Result<()> {
        let query = crate::api::posts::PostQuery {
            filter: format!("owner__profile={profile_id}&"),
            search: String::new(),
        };

        let loaded = tokio::try_join!(
            self.client.get_profile(profile_id),
            self.client.list_posts(&query)
        );

        match loaded {
            Ok((profile, posts)) => {
                self.profile = Some(profile);
                self.posts.reset(posts);
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, profile_id, "Failed to load profile");
                self.notices
                    .error("Failed to load profile data. Please try again later.");
                Err(err)
            }
        }
    }

    pub async fn load_more_posts(&mut self) -> Result<usize> {
        let client = self.client.clone();
        match self.posts.load_more(&client).await {
            Ok(count) => Ok(count),
            Err(err) => {
                self.notices.error("Failed to load more posts. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Follow / unfollow ───────────────────────────────────────────────────

    /// Follow this profile. Counters move after the server confirms.
    pub async fn follow(&mut self) -> Result<()> {
        if !self.client.session().is_authenticated() {
            self.notices.warning("Log in to follow divers!");
            return Ok(());
        }
        let Some(profile) = self.profile.as_ref() else {
            return Ok(());
        };
        if profile.following_id.is_some() || self.is_own_profile() {
            return Ok(());
        }

        let owner = profile.owner.clone();
        match self.client.follow_profile(profile.id).await {
            Ok(follower) => {
                if let Some(profile) = self.profile.as_mut() {
                    profile.apply_follow(follower.id);
                }
                self.notices
                    .success(format!("You are now following {owner}."));
                Ok(())
            }
            Err(err) => {
                self.notices
                    .error("An error occurred while trying to follow. Please try again.");
                Err(err)
            }
        }
    }

    /// Stop following this profile.
    pub async fn unfollow(&mut self) -> Result<()> {
        let Some((following_id, owner)) = self
            .profile
            .as_ref()
            .and_then(|profile| Some((profile.following_id?, profile.owner.clone())))
        else {
            return Ok(());
        };

        match self.client.unfollow(following_id).await {
            Ok(()) => {
                if let Some(profile) = self.profile.as_mut() {
                    profile.apply_unfollow();
                }
                self.notices.warning(format!(
                    "You have unfollowed {owner}. You will no longer see their posts."
                ));
                Ok(())
            }
            Err(err) => {
                self.notices
                    .error("An error occurred while trying to unfollow. Please try again.");
                Err(err)
            }
        }
    }
}
