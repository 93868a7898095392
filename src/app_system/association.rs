use std::fmt;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::actor_framework::StoreClient;
use crate::clients::{OrderClient, ReviewClient};
use crate::config::StoreConfig;
use crate::domain::{
    Order, OrderId, OrderWithReview, Review, ReviewCreate, ReviewId, ReviewLink,
};
use crate::error::StoreError;
use crate::store::Visibility;

/// Coordinates linked order/review pairs.
///
/// A thin layer over two record stores sharing a foreign key. Deleting one
/// side never touches the other: an order whose review was soft-deleted keeps
/// the stale `review_id`, and reads of that order still succeed.
#[derive(Clone)]
pub struct AssociationService {
    store: StoreClient,
    orders: OrderClient,
    reviews: ReviewClient,
    sample_review: ReviewCreate,
    order_number_prefix: String,
}

impl AssociationService {
    pub fn new(store: StoreClient, config: &StoreConfig) -> Self {
        let orders = OrderClient::new(store.resource());
        let reviews = ReviewClient::new(store.resource());
        Self {
            store,
            orders,
            reviews,
            sample_review: config.sample_review.clone(),
            order_number_prefix: config.order_number_prefix.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    /// Creates the sample review and an order pointing at it, atomically.
    #[instrument(skip(self))]
    pub async fn create_pair(&self) -> Result<(OrderId, ReviewId), StoreError> {
        let order_number = self.next_order_number();
        info!(order_number = %order_number, "Creating order with review");
        self.store
            .create_pair(self.sample_review.clone(), order_number)
            .await
    }

    /// Not unique under concurrent callers within the same millisecond; the
    /// schema does not enforce uniqueness either.
    fn next_order_number(&self) -> String {
        format!("{}{}", self.order_number_prefix, Utc::now().timestamp_millis())
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        self.orders.delete_order(order_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, review_id: ReviewId) -> Result<(), StoreError> {
        self.reviews.delete_review(review_id).await
    }

    /// Two independent soft deletes. Stops at the first failure.
    #[instrument(skip(self))]
    pub async fn delete_order_then_review(
        &self,
        order_id: OrderId,
        review_id: ReviewId,
    ) -> Result<(), StoreError> {
        self.orders.delete_order(order_id).await?;
        self.reviews.delete_review(review_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_review_then_order(
        &self,
        order_id: OrderId,
        review_id: ReviewId,
    ) -> Result<(), StoreError> {
        self.reviews.delete_review(review_id).await?;
        self.orders.delete_order(order_id).await
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, StoreError> {
        self.orders.get_order(order_id).await
    }

    pub async fn get_review(&self, review_id: ReviewId) -> Result<Review, StoreError> {
        self.reviews.get_review(review_id).await
    }

    /// Reads an active order and resolves its review through the default
    /// read path. A reference to a soft-deleted review comes back as
    /// [`ReviewLink::Dangling`].
    #[instrument(skip(self))]
    pub async fn get_order_with_review(
        &self,
        order_id: OrderId,
    ) -> Result<OrderWithReview, StoreError> {
        let order = self.orders.get_order(order_id).await?;

        let review = match order.review_id {
            None => ReviewLink::Unlinked,
            Some(review_id) => match self.reviews.get_review(review_id).await {
                Ok(review) => ReviewLink::Live(review),
                Err(e) if e.is_not_found() => {
                    warn!(review_id = %review_id, "Order references a deleted review");
                    ReviewLink::Dangling(review_id)
                }
                Err(e) => return Err(e),
            },
        };

        Ok(OrderWithReview { order, review })
    }

    /// Bypass read of both rows, soft-deleted or not.
    #[instrument(skip(self))]
    pub async fn inspect_pair(
        &self,
        order_id: OrderId,
        review_id: ReviewId,
    ) -> Result<PairSnapshot, StoreError> {
        let order = self.orders.find_order_including_deleted(order_id).await?;
        let review = self.reviews.find_review_including_deleted(review_id).await?;
        Ok(PairSnapshot { order, review })
    }

    pub async fn list_orders(&self, visibility: Visibility) -> Result<Vec<Order>, StoreError> {
        self.orders.list_orders(visibility).await
    }

    pub async fn list_reviews(&self, visibility: Visibility) -> Result<Vec<Review>, StoreError> {
        self.reviews.list_reviews(visibility).await
    }
}

/// Raw state of an order row and a review row, filter bypassed.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSnapshot {
    pub order: Option<Order>,
    pub review: Option<Review>,
}

impl PairSnapshot {
    pub fn both_soft_deleted(&self) -> bool {
        matches!(
            (&self.order, &self.review),
            (Some(order), Some(review)) if order.deletion.is_deleted() && review.deletion.is_deleted()
        )
    }
}

impl fmt::Display for PairSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.order {
            Some(order) => write!(
                f,
                "order(id={}, number={}, review_id={}, deleted_at={})",
                order.id,
                order.order_number,
                display_opt(order.review_id),
                display_opt(order.deletion.deleted_at()),
            )?,
            None => write!(f, "order(missing)")?,
        }
        write!(f, " ")?;
        match &self.review {
            Some(review) => write!(
                f,
                "review(id={}, rating={}, deleted_at={})",
                review.id,
                review.rating,
                display_opt(review.deletion.deleted_at()),
            ),
            None => write!(f, "review(missing)"),
        }
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}
