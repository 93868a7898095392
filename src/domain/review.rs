use chrono::{DateTime, Utc};

use super::{Deletion, ReviewId};

/// A review left for an order. Reviews know nothing about the order that
/// references them.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deletion: Deletion,
}

/// Payload for creating a new review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCreate {
    pub content: String,
    pub rating: i32,
}

impl ReviewCreate {
    pub fn new(content: impl Into<String>, rating: i32) -> Self {
        Self {
            content: content.into(),
            rating,
        }
    }
}
