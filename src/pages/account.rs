// SPDX-License-Identifier: MIT

//! Account settings flows: username, password and profile edits.
//!
//! These are the only pages (besides sign-in/out) that write the
//! session identity, and they only do so with values the server has
//! accepted.

use crate::api::{ApiClient, ImageUpload};
use crate::error::{ApiError, FieldErrors, Result};
use crate::models::{PasswordChangeRequest, Profile, ProfileUpdate};
use crate::notify::Notices;
use crate::state::{ChangeTracked, ConfirmFlow};

// ─── Username ────────────────────────────────────────────────────────────────

/// Change-username form; submit stays disabled while the value matches
/// the current username.
pub struct UsernameForm {
    client: ApiClient,
    notices: Notices,
    form: ChangeTracked<String>,
    flow: ConfirmFlow,
    errors: FieldErrors,
}

impl UsernameForm {
    /// Build from the signed-in user. `None` when anonymous.
    pub fn new(client: ApiClient, notices: Notices) -> Option<Self> {
        let username = client.session().username()?;
        Some(Self {
            client,
            notices,
            form: ChangeTracked::new(username),
            flow: ConfirmFlow::new(),
            errors: FieldErrors::new(),
        })
    }

    pub fn username(&self) -> &str {
        self.form.draft()
    }

    pub fn set_username(&mut self, username: &str) {
        self.form.edit(|draft| *draft = username.to_string());
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Open the confirmation dialog; refused while Clean.
    pub fn request_save(&mut self) -> bool {
        if !self.form.can_submit() {
            return false;
        }
        self.flow.request()
    }

    pub fn dialog_open(&self) -> bool {
        self.flow.is_pending()
    }

    pub fn cancel(&mut self) {
        self.flow.cancel();
        self.notices.info("Username change cancelled.");
    }

    /// Confirmed save: one PUT; the session identity and the form
    /// baseline both take the accepted value.
    pub async fn confirm_save(&mut self) -> Result<()> {
        let username = self.form.draft().clone();
        let client = self.client.clone();

        let result = self
            .flow
            .commit(async move { client.change_username(&username).await })
            .await;

        match result {
            Ok(user) => {
                self.errors.clear();
                self.form.commit_value(user.username);
                self.notices.success("Username updated successfully!");
                Ok(())
            }
            Err(err) => {
                if let Some(fields) = err.field_errors() {
                    self.errors = fields.clone();
                }
                self.notices
                    .error("Failed to update username. Please try again.");
                Err(err)
            }
        }
    }
}

// ─── Password ────────────────────────────────────────────────────────────────

/// Change-password form with the platform's client-side checks.
pub struct PasswordForm {
    client: ApiClient,
    notices: Notices,
    new_password1: String,
    new_password2: String,
    errors: FieldErrors,
}

impl PasswordForm {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            new_password1: String::new(),
            new_password2: String::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn set_password1(&mut self, value: &str) {
        self.new_password1 = value.to_string();
    }

    pub fn set_password2(&mut self, value: &str) {
        self.new_password2 = value.to_string();
    }

    pub fn can_submit(&self) -> bool {
        !self.new_password1.is_empty() && !self.new_password2.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Submit: local checks first (match, minimum length), then the API.
    /// Inputs are cleared only on success.
    pub async fn submit(&mut self) -> Result<()> {
        self.errors.clear();

        let request = PasswordChangeRequest {
            new_password1: self.new_password1.clone(),
            new_password2: self.new_password2.clone(),
        };

        match self.client.change_password(&request).await {
            Ok(()) => {
                self.new_password1.clear();
                self.new_password2.clear();
                self.notices.success("Password changed successfully!");
                Ok(())
            }
            Err(err) => {
                if let Some(fields) = err.field_errors() {
                    self.errors = fields.clone();
                }
                self.notices
                    .error("Failed to change password. Please check the errors and try again.");
                Err(err)
            }
        }
    }
}

// ─── Profile edit ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct ProfileDraft {
    name: String,
    content: String,
}

/// Profile editor: change-tracked name/bio plus an optional new avatar.
pub struct ProfileEditor {
    client: ApiClient,
    notices: Notices,
    profile_id: u64,
    form: Option<ChangeTracked<ProfileDraft>>,
    image: Option<ImageUpload>,
    errors: FieldErrors,
}

impl ProfileEditor {
    pub fn new(client: ApiClient, notices: Notices, profile_id: u64) -> Self {
        Self {
            client,
            notices,
            profile_id,
            form: None,
            image: None,
            errors: FieldErrors::new(),
        }
    }

    /// Load the profile into the form. Only the owner may edit; anyone
    /// else gets `Forbidden` and a notice, without a profile fetch
    /// being trusted for the decision.
    pub async fn load(&mut self) -> Result<Profile> {
        if self.client.session().profile_id() != Some(self.profile_id) {
            self.notices
                .error("You don't have permission to edit this profile.");
            return Err(ApiError::Forbidden);
        }

        match self.client.get_profile(self.profile_id).await {
            Ok(profile) => {
                self.form = Some(ChangeTracked::new(ProfileDraft {
                    name: profile.name.clone(),
                    content: profile.content.clone(),
                }));
                Ok(profile)
            }
            Err(err) => {
                self.notices
                    .error("Failed to load profile data. Please try again later.");
                Err(err)
            }
        }
    }

    pub fn set_name(&mut self, name: &str) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.name = name.to_string());
        }
    }

    pub fn set_content(&mut self, content: &str) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.content = content.to_string());
        }
    }

    /// Select a new avatar; counts as a change on its own.
    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn can_submit(&self) -> bool {
        let fields_dirty = self
            .form
            .as_ref()
            .map(|form| form.is_dirty())
            .unwrap_or(false);
        fields_dirty || self.image.is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Save the profile; the session avatar follows the server's copy.
    pub async fn save(&mut self) -> Result<Profile> {
        let Some(form) = self.form.as_ref() else {
            return Err(ApiError::Internal(anyhow::anyhow!("profile not loaded")));
        };
        let update = ProfileUpdate {
            name: form.draft().name.clone(),
            content: form.draft().content.clone(),
        };

        let result = self
            .client
            .update_profile(self.profile_id, &update, self.image.clone())
            .await;

        match result {
            Ok(profile) => {
                self.errors.clear();
                self.image = None;
                if let Some(form) = self.form.as_mut() {
                    form.commit_value(ProfileDraft {
                        name: profile.name.clone(),
                        content: profile.content.clone(),
                    });
                }
                let image = profile.image.clone();
                self.client
                    .session()
                    .update_user(|user| user.profile_image = image);
                self.notices.success("Profile updated successfully!");
                Ok(profile)
            }
            Err(err) => {
                if let Some(fields) = err.field_errors() {
                    self.errors = fields.clone();
                }
                self.notices
                    .error("Failed to update profile. Please try again.");
                Err(err)
            }
        }
    }
}
