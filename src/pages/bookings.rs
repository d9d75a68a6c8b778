// SPDX-License-Identifier: MIT

//! Bookings page: list, create, slot-moving edits and cancellation.
//!
//! Editing goes through the change-tracked form and the confirmation
//! dialog: an unchanged submit never reaches the network, and a slot
//! move is only sent with `confirm_changes` after an explicit confirm.

use crate::api::bookings::BookingUpdateOutcome;
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{Booking, BookingDraft, Course};
use crate::notify::Notices;
use crate::state::{ChangeTracked, ConfirmFlow, PagedCollection};

struct BookingEdit {
    booking_id: u64,
    form: ChangeTracked<BookingDraft>,
}

/// The signed-in user's bookings.
pub struct BookingManager {
    client: ApiClient,
    notices: Notices,
    bookings: PagedCollection<Booking>,
    courses: Vec<Course>,
    edit: Option<BookingEdit>,
    update_flow: ConfirmFlow,
    delete_flow: ConfirmFlow,
    pending_delete: Option<u64>,
    loaded: bool,
}

impl BookingManager {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            bookings: PagedCollection::new(),
            courses: Vec::new(),
            edit: None,
            update_flow: ConfirmFlow::new(),
            delete_flow: ConfirmFlow::new(),
            pending_delete: None,
            loaded: false,
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        self.bookings.items()
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.as_slice()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Load bookings and the course catalogue together. Requires a
    /// signed-in user; anonymous visitors are sent to sign-in by the
    /// router before this page mounts.
    pub async fn load(&mut self) -> Result<()> {
        if !self.client.session().is_authenticated() {
            return Err(ApiError::Unauthorized);
        }

        let loaded = tokio::try_join!(self.client.list_bookings(), self.client.list_courses());
        match loaded {
            Ok((bookings, courses)) => {
                self.bookings.reset(bookings);
                self.courses = courses.results;
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load bookings");
                self.notices.error("Failed to load bookings. Please try again.");
                Err(err)
            }
        }
    }

    /// Another booking already occupying the same course, date and time.
    fn has_conflict(&self, draft: &BookingDraft, exclude: Option<u64>) -> bool {
        self.bookings.items().iter().any(|booking| {
            Some(booking.id) != exclude
                && booking.date == draft.date
                && booking.time == draft.time
                && booking.course == draft.course
        })
    }

    // ─── Create ──────────────────────────────────────────────────────────────

    /// Create a booking from a validated draft.
    pub async fn create(&mut self, draft: &BookingDraft) -> Result<Booking> {
        if self.has_conflict(draft, None) {
            self.notices.warning(
                "You already have a booking for this course, date, and time. Please try again.",
            );
            return Err(crate::api::auth::field_error(
                "date",
                "Duplicate booking slot.",
            ));
        }

        match self.client.create_booking(draft).await {
            Ok(booking) => {
                self.bookings.push_back(booking.clone());
                self.notices.success("Booking submitted successfully!");
                Ok(booking)
            }
            Err(err) => {
                if err.is_auth_error() {
                    self.notices
                        .error("Your session has expired. Please sign in again.");
                } else {
                    self.notices.error(err.display_message());
                }
                Err(err)
            }
        }
    }

    // ─── Edit (change-tracked + confirm-then-commit) ─────────────────────────

    /// Open the inline edit form for a booking.
    pub fn begin_edit(&mut self, booking_id: u64) -> bool {
        let Some(booking) = self.bookings.get(booking_id) else {
            return false;
        };
        self.edit = Some(BookingEdit {
            booking_id,
            form: ChangeTracked::new(BookingDraft::from(booking)),
        });
        true
    }

    pub fn editing(&self) -> Option<u64> {
        self.edit.as_ref().map(|edit| edit.booking_id)
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        self.edit.as_ref().map(|edit| edit.form.draft())
    }

    /// Apply an edit to the draft.
    pub fn edit_draft(&mut self, apply: impl FnOnce(&mut BookingDraft)) {
        if let Some(edit) = self.edit.as_mut() {
            edit.form.edit(apply);
        }
    }

    /// The update button stays disabled until a tracked field differs.
    pub fn can_submit(&self) -> bool {
        self.edit
            .as_ref()
            .map(|edit| edit.form.can_submit())
            .unwrap_or(false)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.update_flow.cancel();
    }

    /// Submit the edit form: no-op with a hint when unchanged, warning
    /// on a duplicate slot, otherwise open the confirmation dialog.
    pub fn request_update(&mut self) -> bool {
        let Some(edit) = self.edit.as_ref() else {
            return false;
        };
        if !edit.form.can_submit() {
            self.notices.info("No changes were made to the booking.");
            self.edit = None;
            return false;
        }
        if self.has_conflict(edit.form.draft(), Some(edit.booking_id)) {
            self.notices.warning(
                "You already have a booking for this course, date, and time. Please try again.",
            );
            return false;
        }
        self.update_flow.request()
    }

    pub fn update_dialog_open(&self) -> bool {
        self.update_flow.is_pending()
    }

    pub fn cancel_update(&mut self) {
        self.update_flow.cancel();
    }

    /// Confirmed update: exactly one PUT with `confirm_changes` set.
    /// The draft survives a failure so the user can retry as-is.
    pub async fn confirm_update(&mut self) -> Result<()> {
        let Some((booking_id, draft)) = self
            .edit
            .as_ref()
            .map(|edit| (edit.booking_id, edit.form.draft().clone()))
        else {
            self.update_flow.cancel();
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .update_flow
            .commit(async move { client.update_booking(booking_id, &draft, true).await })
            .await;

        match result {
            Ok(BookingUpdateOutcome::Updated(updated)) => {
                self.bookings.replace_one(booking_id, updated);
                self.edit = None;
                self.notices.success("Booking updated successfully!");
                Ok(())
            }
            Ok(BookingUpdateOutcome::ConfirmRequired) => {
                // Server wants the acknowledgement again; reopen the dialog.
                self.notices
                    .info("Please confirm the booking changes to continue.");
                self.update_flow.request();
                Ok(())
            }
            Err(err) => {
                match &err {
                    ApiError::Validation(_) => self.notices.error(err.display_message()),
                    _ => self
                        .notices
                        .error("Failed to update booking. Please try again."),
                }
                Err(err)
            }
        }
    }

    // ─── Delete (confirm-then-commit) ────────────────────────────────────────

    pub fn request_delete(&mut self, booking_id: u64) -> bool {
        if !self.bookings.contains(booking_id) {
            return false;
        }
        if self.delete_flow.request() {
            self.pending_delete = Some(booking_id);
            true
        } else {
            false
        }
    }

    pub fn delete_dialog_open(&self) -> bool {
        self.delete_flow.is_pending()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_flow.cancel();
        self.pending_delete = None;
    }

    /// Confirmed delete: removes exactly one booking from the cache.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(booking_id) = self.pending_delete.take() else {
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .delete_flow
            .commit(async move { client.delete_booking(booking_id).await })
            .await;

        match result {
            Ok(()) => {
                self.bookings.remove_one(booking_id);
                self.notices.success("Booking deleted successfully!");
                Ok(())
            }
            Err(err) => {
                if err.is_auth_error() {
                    self.notices.error("Unauthorized. Please log in again.");
                } else {
                    self.notices
                        .error("Failed to delete booking. Please try again.");
                }
                Err(err)
            }
        }
    }
}
