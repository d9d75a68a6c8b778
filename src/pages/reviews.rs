// SPDX-License-Identifier: MIT

//! Course page: detail view with the review lifecycle.
//!
//! One review per user per course. New reviews submit directly; edits
//! go through the change-tracked form and the confirmation dialog.
//! `average_rating` is recomputed locally after every review mutation.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Course, Review, ReviewDraft, ReviewRequest};
use crate::notify::Notices;
use crate::state::{ChangeTracked, ConfirmFlow};

/// The single-course page with its embedded reviews.
pub struct CourseReviews {
    client: ApiClient,
    notices: Notices,
    course: Option<Course>,
    form: Option<ChangeTracked<ReviewDraft>>,
    /// Id of the review being edited; `None` while writing a new one.
    editing_review: Option<u64>,
    update_flow: ConfirmFlow,
    delete_flow: ConfirmFlow,
}

impl CourseReviews {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            course: None,
            form: None,
            editing_review: None,
            update_flow: ConfirmFlow::new(),
            delete_flow: ConfirmFlow::new(),
        }
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn reviews(&self) -> &[Review] {
        self.course
            .as_ref()
            .map(|course| course.reviews.as_slice())
            .unwrap_or(&[])
    }

    /// The signed-in user's review of this course, if any.
    pub fn user_review(&self) -> Option<&Review> {
        let username = self.client.session().username()?;
        self.course.as_ref()?.review_by(&username)
    }

    /// `GET /courses/{slug}/`
    pub async fn load(&mut self, slug: &str) -> Result<()> {
        match self.client.get_course(slug).await {
            Ok(course) => {
                self.course = Some(course);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, slug, "Failed to load course");
                self.notices
                    .error("Failed to load course data. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Review form ─────────────────────────────────────────────────────────

    /// Open the form for a new review. Anonymous users are redirected
    /// to sign-in by the caller; this just refuses with a hint.
    pub fn open_editor(&mut self) -> bool {
        if !self.client.session().is_authenticated() {
            self.notices.warning("Please sign in to add a review.");
            return false;
        }
        self.editing_review = None;
        self.form = Some(ChangeTracked::new(ReviewDraft::default()));
        true
    }

    /// Open the form pre-filled with the user's existing review.
    pub fn open_editor_for_existing(&mut self) -> bool {
        let Some(review) = self.user_review() else {
            return false;
        };
        let (id, draft) = (review.id, ReviewDraft::from(review));
        self.editing_review = Some(id);
        self.form = Some(ChangeTracked::new(draft));
        true
    }

    pub fn editor_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_review.is_some()
    }

    pub fn draft(&self) -> Option<&ReviewDraft> {
        self.form.as_ref().map(|form| form.draft())
    }

    pub fn set_content(&mut self, content: &str) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.content = content.to_string());
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.rating = rating);
        }
    }

    /// Edits stay disabled until a field differs; a fresh review just
    /// needs any input.
    pub fn can_submit(&self) -> bool {
        self.form
            .as_ref()
            .map(|form| form.can_submit())
            .unwrap_or(false)
    }

    pub fn close_editor(&mut self) {
        self.form = None;
        self.editing_review = None;
        self.update_flow.cancel();
        self.notices.info("Review cancelled.");
    }

    /// Submit the form: a new review posts directly, an edit opens the
    /// confirmation dialog first. Submitting without a star rating is
    /// refused before any request.
    pub async fn submit(&mut self) -> Result<()> {
        let Some(form) = self.form.as_ref() else {
            return Ok(());
        };
        if form.draft().rating == 0 {
            self.notices
                .error("Please select a star rating before submitting your review.");
            return Ok(());
        }

        if self.editing_review.is_some() {
            self.update_flow.request();
            return Ok(());
        }
        self.submit_new().await
    }

    pub fn update_dialog_open(&self) -> bool {
        self.update_flow.is_pending()
    }

    pub fn cancel_update(&mut self) {
        self.update_flow.cancel();
    }

    async fn submit_new(&mut self) -> Result<()> {
        let Some(request) = self.request_payload() else {
            return Ok(());
        };

        match self.client.create_review(&request).await {
            Ok(review) => {
                if let Some(course) = self.course.as_mut() {
                    course.reviews.insert(0, review);
                    course.recompute_average_rating();
                }
                self.form = None;
                self.notices.success("Review submitted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Failed to submit review. Please try again.");
                Err(err)
            }
        }
    }

    /// Confirmed edit: exactly one PUT; the form survives a failure.
    pub async fn confirm_update(&mut self) -> Result<()> {
        let Some(review_id) = self.editing_review else {
            self.update_flow.cancel();
            return Ok(());
        };
        let Some(request) = self.request_payload() else {
            self.update_flow.cancel();
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .update_flow
            .commit(async move { client.update_review(review_id, &request).await })
            .await;

        match result {
            Ok(updated) => {
                if let Some(course) = self.course.as_mut() {
                    if let Some(slot) = course
                        .reviews
                        .iter_mut()
                        .find(|review| review.id == review_id)
                    {
                        *slot = updated;
                    }
                    course.recompute_average_rating();
                }
                self.form = None;
                self.editing_review = None;
                self.notices.success("Review updated successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Failed to submit review. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Deletion (confirm-then-commit) ──────────────────────────────────────

    pub fn request_delete(&mut self) -> bool {
        if self.user_review().is_none() {
            return false;
        }
        self.delete_flow.request()
    }

    pub fn delete_dialog_open(&self) -> bool {
        self.delete_flow.is_pending()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_flow.cancel();
    }

    /// Confirmed delete of the user's review.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(review_id) = self.user_review().map(|review| review.id) else {
            self.delete_flow.cancel();
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .delete_flow
            .commit(async move { client.delete_review(review_id).await })
            .await;

        match result {
            Ok(()) => {
                if let Some(course) = self.course.as_mut() {
                    course.reviews.retain(|review| review.id != review_id);
                    course.recompute_average_rating();
                }
                self.form = None;
                self.editing_review = None;
                self.notices.success("Review deleted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Failed to delete review. Please try again.");
                Err(err)
            }
        }
    }

    fn request_payload(&self) -> Option<ReviewRequest> {
        let course = self.course.as_ref()?;
        let draft = self.form.as_ref()?.draft();
        Some(ReviewRequest {
            content: draft.content.clone(),
            rating: draft.rating,
            course: course.id,
        })
    }
}
