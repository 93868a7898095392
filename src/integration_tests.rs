#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::app_system::AssociationService;
    use crate::config::StoreConfig;
    use crate::domain::{
        Deletion, EntityKind, Order, OrderId, Review, ReviewId, ReviewLink,
    };
    use crate::error::StoreError;
    use crate::mock_framework::{create_mock_store, expect_create_pair, expect_delete, expect_get};
    use crate::store::Visibility;

    fn order(id: i64, review_id: Option<i64>) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId(id),
            order_number: format!("ORD-{}", id),
            review_id: review_id.map(ReviewId),
            created_at: now,
            updated_at: now,
            deletion: Deletion::Active,
        }
    }

    #[tokio::test]
    async fn test_create_pair_sends_sample_review() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move { service.create_pair().await });

        let (review, order_number, responder) = expect_create_pair(&mut store_rx)
            .await
            .expect("Expected CreatePair");
        assert_eq!(review.content, "good prod");
        assert_eq!(review.rating, 10);
        let millis: i64 = order_number
            .strip_prefix("ORD-")
            .expect("Expected ORD- prefix")
            .parse()
            .expect("Expected millisecond timestamp");
        assert!(millis > 0);
        responder.send(Ok((OrderId(1), ReviewId(1)))).unwrap();

        assert_eq!(task.await.unwrap(), Ok((OrderId(1), ReviewId(1))));
    }

    #[tokio::test]
    async fn test_delete_order_then_review_sends_order_first() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move {
            service
                .delete_order_then_review(OrderId(1), ReviewId(2))
                .await
        });

        let (order_id, responder) = expect_delete::<Order>(&mut store_rx)
            .await
            .expect("Expected Order Delete");
        assert_eq!(order_id, OrderId(1));
        responder.send(Ok(())).unwrap();

        let (review_id, responder) = expect_delete::<Review>(&mut store_rx)
            .await
            .expect("Expected Review Delete");
        assert_eq!(review_id, ReviewId(2));
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_delete_review_then_order_sends_review_first() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move {
            service
                .delete_review_then_order(OrderId(1), ReviewId(2))
                .await
        });

        let (review_id, responder) = expect_delete::<Review>(&mut store_rx)
            .await
            .expect("Expected Review Delete");
        assert_eq!(review_id, ReviewId(2));
        responder.send(Ok(())).unwrap();

        let (order_id, responder) = expect_delete::<Order>(&mut store_rx)
            .await
            .expect("Expected Order Delete");
        assert_eq!(order_id, OrderId(1));
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_delete_sequence_stops_at_first_failure() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move {
            service
                .delete_order_then_review(OrderId(1), ReviewId(2))
                .await
        });

        let (_, responder) = expect_delete::<Order>(&mut store_rx)
            .await
            .expect("Expected Order Delete");
        responder
            .send(Err(StoreError::not_found(EntityKind::Order, 1)))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(StoreError::not_found(EntityKind::Order, 1))
        );
        // The task (and its sender) is gone; no review delete was queued.
        assert!(store_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_order_read_is_not_found() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move { service.get_order(OrderId(5)).await });

        let (id, visibility, responder) = expect_get::<Order>(&mut store_rx)
            .await
            .expect("Expected Order Get");
        assert_eq!(id, OrderId(5));
        assert_eq!(visibility, Visibility::Active);
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(StoreError::not_found(EntityKind::Order, 5))
        );
    }

    #[tokio::test]
    async fn test_order_with_deleted_review_resolves_dangling() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move { service.get_order_with_review(OrderId(1)).await });

        let (_, _, responder) = expect_get::<Order>(&mut store_rx)
            .await
            .expect("Expected Order Get");
        responder.send(Ok(Some(order(1, Some(7))))).unwrap();

        let (review_id, visibility, responder) = expect_get::<Review>(&mut store_rx)
            .await
            .expect("Expected Review Get");
        assert_eq!(review_id, ReviewId(7));
        assert_eq!(visibility, Visibility::Active);
        responder.send(Ok(None)).unwrap();

        let resolved = task.await.unwrap().unwrap();
        assert_eq!(resolved.order.review_id, Some(ReviewId(7)));
        assert_eq!(resolved.review, ReviewLink::Dangling(ReviewId(7)));
    }

    #[tokio::test]
    async fn test_storage_failure_during_association_propagates() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move { service.get_order_with_review(OrderId(1)).await });

        let (_, _, responder) = expect_get::<Order>(&mut store_rx).await.unwrap();
        responder.send(Ok(Some(order(1, Some(7))))).unwrap();

        let (_, _, responder) = expect_get::<Review>(&mut store_rx).await.unwrap();
        responder
            .send(Err(StoreError::Database("disk I/O error".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(StoreError::Database("disk I/O error".to_string()))
        );
    }

    #[tokio::test]
    async fn test_inspect_pair_bypasses_filter() {
        let (store, mut store_rx) = create_mock_store(10);
        let service = AssociationService::new(store, &StoreConfig::default());

        let task = tokio::spawn(async move { service.inspect_pair(OrderId(1), ReviewId(1)).await });

        let (_, visibility, responder) = expect_get::<Order>(&mut store_rx).await.unwrap();
        assert_eq!(visibility, Visibility::IncludeDeleted);
        responder.send(Ok(None)).unwrap();

        let (_, visibility, responder) = expect_get::<Review>(&mut store_rx).await.unwrap();
        assert_eq!(visibility, Visibility::IncludeDeleted);
        responder.send(Ok(None)).unwrap();

        let snapshot = task.await.unwrap().unwrap();
        assert_eq!(snapshot.order, None);
        assert_eq!(snapshot.review, None);
    }
}
