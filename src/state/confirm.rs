// SPDX-License-Identifier: MIT

//! Confirm-then-commit interaction flow.
//!
//! A user action requests a mutation, a dialog asks for confirmation,
//! and only an explicit confirm issues the remote call. Shared by the
//! post, comment, booking, review and profile pages instead of each
//! re-implementing the dialog dance.

use crate::error::{ApiError, Result};
use std::future::Future;

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmState {
    #[default]
    Idle,
    /// Dialog is open, waiting for the user.
    PendingConfirmation,
    /// The remote mutation is in flight.
    Committing,
}

/// Two-step mutation gate: Idle → PendingConfirmation → Committing → Idle.
#[derive(Debug, Default)]
pub struct ConfirmFlow {
    state: ConfirmState,
}

impl ConfirmFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    /// Whether the confirmation dialog should be shown.
    pub fn is_pending(&self) -> bool {
        self.state == ConfirmState::PendingConfirmation
    }

    pub fn is_committing(&self) -> bool {
        self.state == ConfirmState::Committing
    }

    /// Open the dialog. Returns false if the flow is mid-commit or the
    /// dialog is already open.
    pub fn request(&mut self) -> bool {
        if self.state == ConfirmState::Idle {
            self.state = ConfirmState::PendingConfirmation;
            true
        } else {
            false
        }
    }

    /// Close the dialog without side effects.
    pub fn cancel(&mut self) -> bool {
        if self.state == ConfirmState::PendingConfirmation {
            self.state = ConfirmState::Idle;
            true
        } else {
            false
        }
    }

    /// Issue the confirmed mutation.
    ///
    /// Runs `operation` exactly once and returns to Idle on both
    /// success and failure; the caller's draft state survives a failed
    /// commit so the user can retry without re-entering data. Calling
    /// without a pending confirmation is an error and issues nothing.
    pub async fn commit<T, Fut>(&mut self, operation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        if self.state != ConfirmState::PendingConfirmation {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "commit without a pending confirmation"
            )));
        }

        self.state = ConfirmState::Committing;
        let result = operation.await;
        self.state = ConfirmState::Idle;
        result
    }
}
