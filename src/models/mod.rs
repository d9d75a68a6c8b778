// SPDX-License-Identifier: MIT

//! Wire models for the DivingSpace REST API.
//!
//! Every entity here is a transient cached copy of server state; the
//! client never owns one beyond the current session.

pub mod booking;
pub mod comment;
pub mod course;
pub mod page;
pub mod post;
pub mod profile;
pub mod user;

pub use booking::{Booking, BookingDraft, BookingUpdateRequest};
pub use comment::{Comment, CommentCreateRequest, CommentUpdateRequest};
pub use course::{Course, Review, ReviewDraft, ReviewRequest};
pub use page::Page;
pub use post::{Like, LikeRequest, Post, PostUpdate};
pub use profile::{FollowRequest, Follower, Profile, ProfileUpdate};
pub use user::{
    CurrentUser, LoginRequest, LoginResponse, PasswordChangeRequest, RefreshRequest,
    RefreshResponse, RegistrationRequest,
};

/// Entities addressable by their server-assigned identifier.
///
/// Implemented by everything the list cache stores.
pub trait Identified {
    fn id(&self) -> u64;
}
