// SPDX-License-Identifier: MIT

//! Course and review models.

use super::Identified;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A diving course, with its reviews embedded in the detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course_type: String,
    /// Decimal price serialized as a string by the API.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub price_display: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Course {
    /// Recompute `average_rating` from the embedded reviews, as the
    /// platform does after any review mutation. Zero when there are none.
    pub fn recompute_average_rating(&mut self) {
        if self.reviews.is_empty() {
            self.average_rating = 0.0;
        } else {
            let sum: u64 = self.reviews.iter().map(|review| u64::from(review.rating)).sum();
            self.average_rating = sum as f64 / self.reviews.len() as f64;
        }
    }

    /// The review left by `username`, if any.
    pub fn review_by(&self, username: &str) -> Option<&Review> {
        self.reviews.iter().find(|review| review.user == username)
    }
}

impl Identified for Course {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A course review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    /// Username of the reviewer.
    pub user: String,
    pub content: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub course: u64,
    #[serde(default)]
    pub created_at: String,
}

impl Identified for Review {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Working copy of a review being written or edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub content: String,
    pub rating: u8,
}

impl From<&Review> for ReviewDraft {
    fn from(review: &Review) -> Self {
        Self {
            content: review.content.clone(),
            rating: review.rating,
        }
    }
}

/// `POST /reviews/` and `PUT /reviews/{id}/`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ReviewRequest {
    pub content: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5 stars."))]
    pub rating: u8,
    pub course: u64,
}
