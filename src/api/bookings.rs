// SPDX-License-Identifier: MIT

//! Bookings endpoints.

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{Booking, BookingDraft, BookingUpdateRequest, Page};
use serde::Deserialize;

/// Outcome of a booking update.
///
/// The server may answer a slot-moving update with a confirmation
/// demand instead of the stored booking; the manager re-opens the
/// dialog in that case.
#[derive(Debug, Clone)]
pub enum BookingUpdateOutcome {
    Updated(Booking),
    ConfirmRequired,
}

impl ApiClient {
    /// `GET /bookings/` — the signed-in user's bookings.
    pub async fn list_bookings(&self) -> Result<Page<Booking>> {
        self.get_json("bookings/").await
    }

    /// `POST /bookings/`
    pub async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking> {
        super::auth::validate_payload(draft)?;
        self.post_json("bookings/", draft).await
    }

    /// `PUT /bookings/{id}/`
    pub async fn update_booking(
        &self,
        id: u64,
        draft: &BookingDraft,
        confirm_changes: bool,
    ) -> Result<BookingUpdateOutcome> {
        super::auth::validate_payload(draft)?;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum UpdateReply {
            Stored(Booking),
            ConfirmDemand { confirm_changes: bool },
        }

        let request = BookingUpdateRequest {
            draft: draft.clone(),
            confirm_changes,
        };
        let reply: UpdateReply = self
            .put_json(&format!("bookings/{id}/"), &request)
            .await?;

        Ok(match reply {
            UpdateReply::Stored(booking) => BookingUpdateOutcome::Updated(booking),
            UpdateReply::ConfirmDemand { .. } => BookingUpdateOutcome::ConfirmRequired,
        })
    }

    /// `DELETE /bookings/{id}/`
    pub async fn delete_booking(&self, id: u64) -> Result<()> {
        self.delete(&format!("bookings/{id}/")).await
    }
}
