// SPDX-License-Identifier: MIT

//! Reusable client-side state components.
//!
//! The platform's pages are all built from the same few pieces: a
//! cached paginated list that mutations reconcile locally, a
//! change-tracked form gating its submit button, and a two-step
//! confirm-then-commit dialog around every destructive or slot-moving
//! mutation.

pub mod collection;
pub mod confirm;
pub mod form;
pub mod task;

pub use collection::{PagedCollection, Paginator};
pub use confirm::{ConfirmFlow, ConfirmState};
pub use form::ChangeTracked;
pub use task::ViewTask;
