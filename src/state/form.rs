// SPDX-License-Identifier: MIT

//! Change-tracked form state.
//!
//! Holds the original and working copies of an editable entity. The
//! form is Dirty exactly when the draft differs from the original;
//! submit controls stay disabled while Clean. A successful commit
//! re-baselines the original to the committed values.

/// Original/draft pair with field-by-field change detection.
#[derive(Debug, Clone)]
pub struct ChangeTracked<T: Clone + PartialEq> {
    original: T,
    draft: T,
}

impl<T: Clone + PartialEq> ChangeTracked<T> {
    pub fn new(value: T) -> Self {
        Self {
            original: value.clone(),
            draft: value,
        }
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    /// Apply an edit to the working copy.
    pub fn edit(&mut self, apply: impl FnOnce(&mut T)) {
        apply(&mut self.draft);
    }

    /// Dirty iff at least one tracked field differs from the original.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Submit is only permitted while Dirty.
    pub fn can_submit(&self) -> bool {
        self.is_dirty()
    }

    /// Discard the draft, returning to Clean.
    pub fn revert(&mut self) {
        self.draft = self.original.clone();
    }

    /// After a successful commit: the draft becomes the new baseline.
    pub fn commit(&mut self) {
        self.original = self.draft.clone();
    }

    /// After a successful commit where the server returned the stored
    /// entity: both copies take the server's values.
    pub fn commit_value(&mut self, value: T) {
        self.original = value.clone();
        self.draft = value;
    }
}
