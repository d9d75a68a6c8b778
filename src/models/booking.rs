// SPDX-License-Identifier: MIT

//! Booking model and payloads.

use super::Identified;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A course booking belonging to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// Slot time, e.g. `09:00`.
    pub time: String,
    /// Booked course id.
    pub course: u64,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub additional_info: String,
}

impl Identified for Booking {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Editable booking fields, tracked by the edit form and sent on
/// create. `date` must parse as `YYYY-MM-DD`; `validate()` checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookingDraft {
    #[validate(custom(function = validate_iso_date))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required."))]
    pub time: String,
    #[validate(range(min = 1, message = "Course is required."))]
    pub course: u64,
    #[serde(default)]
    pub additional_info: String,
}

impl From<&Booking> for BookingDraft {
    fn from(booking: &Booking) -> Self {
        Self {
            date: booking.date.clone(),
            time: booking.time.clone(),
            course: booking.course,
            additional_info: booking.additional_info.clone(),
        }
    }
}

fn validate_iso_date(date: &str) -> Result<(), validator::ValidationError> {
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("date");
        error.message = Some("Enter a valid date (YYYY-MM-DD).".into());
        Err(error)
    }
}

/// `PUT /bookings/{id}/` — the update carries `confirm_changes` because
/// moving a slot may lose the original spot and the server wants an
/// explicit acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct BookingUpdateRequest {
    #[serde(flatten)]
    pub draft: BookingDraft,
    pub confirm_changes: bool,
}
