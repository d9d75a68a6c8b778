// SPDX-License-Identifier: MIT

//! Page view models.
//!
//! Each page owns its list cache exclusively, reads the shared session
//! for identity and gating, and reconciles the cache locally after
//! confirmed mutations. The embedding UI renders from these structs and
//! forwards user events to their methods.

pub mod account;
pub mod bookings;
pub mod feed;
pub mod profile;
pub mod reviews;

pub use account::{PasswordForm, ProfileEditor, UsernameForm};
pub use bookings::BookingManager;
pub use feed::{PostDetail, PostEditor, PostFeed};
pub use profile::ProfileView;
pub use reviews::CourseReviews;
