// SPDX-License-Identifier: MIT

//! DivingSpace client: the browser-side half of a diving-school
//! community platform, as a typed async library.
//!
//! The crate wraps the platform's REST API (auth, feed, courses,
//! bookings, profiles) and carries the client-side state the pages are
//! built from: a paginated list cache reconciled locally after
//! confirmed mutations, change-tracked forms, confirm-then-commit
//! dialogs and a process-wide session identity with silent refresh.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod pages;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, Result};
pub use notify::Notices;
pub use session::Session;
