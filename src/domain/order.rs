use chrono::{DateTime, Utc};

use super::{Deletion, OrderId, Review, ReviewId};

/// Represents a customer order, optionally pointing at one review.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    /// Plain foreign key. Left untouched when the review is soft-deleted.
    pub review_id: Option<ReviewId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deletion: Deletion,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub review_id: Option<ReviewId>,
}

impl OrderCreate {
    pub fn new(order_number: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            review_id: None,
        }
    }

    pub fn with_review(mut self, review_id: ReviewId) -> Self {
        self.review_id = Some(review_id);
        self
    }
}

/// How an order's `review_id` resolves through the default read path.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewLink {
    /// The order carries no review reference.
    Unlinked,
    Live(Review),
    /// The column holds an id with no active review behind it.
    Dangling(ReviewId),
}

/// An active order together with its resolved association.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithReview {
    pub order: Order,
    pub review: ReviewLink,
}
