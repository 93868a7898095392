//! # Mock Framework
//!
//! Utilities for testing clients and the association service without a
//! database.
//!
//! Use [`create_mock_store`] to get a client and the receiving end of its
//! channel, then pull requests off with [`expect_get`], [`expect_delete`] or
//! [`expect_create_pair`] and answer them by hand.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceRequest, Response, StoreClient, StoreRequest};
use crate::domain::{OrderId, ReviewCreate, ReviewId};
use crate::store::Visibility;

/// Creates a store client whose requests land on the returned receiver.
pub fn create_mock_store(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

async fn next_for<T: Entity>(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<ResourceRequest<T>> {
    receiver.recv().await.and_then(|request| T::from_store_request(request).ok())
}

/// Next message must be a Get for `T`.
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(T::Id, Visibility, Response<Option<T>>)> {
    match next_for::<T>(receiver).await {
        Some(ResourceRequest::Get {
            id,
            visibility,
            respond_to,
        }) => Some((id, visibility, respond_to)),
        _ => None,
    }
}

/// Next message must be a soft delete for `T`.
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(T::Id, Response<()>)> {
    match next_for::<T>(receiver).await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_create_pair(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(ReviewCreate, String, Response<(OrderId, ReviewId)>)> {
    match receiver.recv().await {
        Some(StoreRequest::CreatePair {
            review,
            order_number,
            respond_to,
        }) => Some((review, order_number, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ReviewClient;
    use crate::domain::Review;

    #[tokio::test]
    async fn test_mock_store() {
        let (store, mut receiver) = create_mock_store(10);
        let reviews = ReviewClient::new(store.resource());

        let delete_task = tokio::spawn(async move { reviews.delete_review(ReviewId(9)).await });

        let (id, responder) = expect_delete::<Review>(&mut receiver)
            .await
            .expect("Expected Review Delete");
        assert_eq!(id, ReviewId(9));
        responder.send(Ok(())).unwrap();

        assert_eq!(delete_task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_wrong_table_is_rejected() {
        let (store, mut receiver) = create_mock_store(10);
        let reviews = ReviewClient::new(store.resource());

        let _task = tokio::spawn(async move { reviews.delete_review(ReviewId(1)).await });

        assert!(expect_delete::<crate::domain::Order>(&mut receiver).await.is_none());
    }
}
