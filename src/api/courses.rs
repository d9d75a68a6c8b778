// SPDX-License-Identifier: MIT

//! Courses and reviews endpoints.

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{Course, Page, Review, ReviewRequest};

impl ApiClient {
    /// `GET /courses/` — first page.
    pub async fn list_courses(&self) -> Result<Page<Course>> {
        self.get_json("courses/").await
    }

    /// `GET /courses/{slug}/` — detail with embedded reviews.
    pub async fn get_course(&self, slug: &str) -> Result<Course> {
        self.get_json(&format!("courses/{slug}/")).await
    }

    /// `POST /reviews/`
    pub async fn create_review(&self, request: &ReviewRequest) -> Result<Review> {
        super::auth::validate_payload(request)?;
        self.post_json("reviews/", request).await
    }

    /// `PUT /reviews/{id}/`
    pub async fn update_review(&self, id: u64, request: &ReviewRequest) -> Result<Review> {
        super::auth::validate_payload(request)?;
        self.put_json(&format!("reviews/{id}/"), request).await
    }

    /// `DELETE /reviews/{id}/`
    pub async fn delete_review(&self, id: u64) -> Result<()> {
        self.delete(&format!("reviews/{id}/")).await
    }
}
