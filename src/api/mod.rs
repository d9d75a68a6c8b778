// SPDX-License-Identifier: MIT

//! Typed wrappers for the DivingSpace REST API.
//!
//! [`client::ApiClient`] carries the shared HTTP client, the session
//! handle and the request/response plumbing; the resource modules add
//! one wrapper method per endpoint.

pub mod auth;
pub mod bookings;
pub mod client;
pub mod comments;
pub mod courses;
pub mod posts;
pub mod profiles;

pub use client::{ApiClient, FormValue, ImageUpload};
