mod actor_framework;
mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod orders;
mod reviews;
mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, AssociationService, AssociationSystem};
use crate::config::StoreConfig;
use crate::domain::ReviewLink;
use crate::error::StoreError;
use crate::store::Visibility;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StoreConfig::from_env()?;
    info!(location = ?config.location, "Starting order/review soft-delete demo");

    let system = AssociationSystem::start(&config)?;
    let service = &system.service;

    delete_only_order(service)
        .instrument(tracing::info_span!("delete_only_order"))
        .await?;
    delete_only_review(service)
        .instrument(tracing::info_span!("delete_only_review"))
        .await?;
    delete_order_first(service)
        .instrument(tracing::info_span!("delete_order_first"))
        .await?;
    delete_review_first(service)
        .instrument(tracing::info_span!("delete_review_first"))
        .await?;
    list_all(service)
        .instrument(tracing::info_span!("list_all"))
        .await?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

async fn delete_only_order(service: &AssociationService) -> Result<(), StoreError> {
    let (order_id, review_id) = service.create_pair().await?;
    let before = service.get_order(order_id).await?;
    info!(order_id = %before.id, review_id = ?before.review_id, "Before delete");

    service.delete_order(order_id).await?;

    match service.get_review(review_id).await {
        Ok(review) => info!(review_id = %review.id, "Review still readable"),
        Err(e) => warn!(error = %e, "Review lookup failed"),
    }
    let snapshot = service.inspect_pair(order_id, review_id).await?;
    info!(%snapshot, "Raw rows after delete");
    Ok(())
}

async fn delete_only_review(service: &AssociationService) -> Result<(), StoreError> {
    let (order_id, review_id) = service.create_pair().await?;
    service.delete_review(review_id).await?;

    match service.get_order_with_review(order_id).await {
        Ok(resolved) => match resolved.review {
            ReviewLink::Dangling(stale) => {
                info!(order_id = %order_id, review_id = %stale, "Order still points at deleted review")
            }
            other => info!(order_id = %order_id, link = ?other, "Order after review delete"),
        },
        Err(e) => warn!(error = %e, "Order lookup failed"),
    }
    let snapshot = service.inspect_pair(order_id, review_id).await?;
    info!(%snapshot, "Raw rows after delete");
    Ok(())
}

async fn delete_order_first(service: &AssociationService) -> Result<(), StoreError> {
    let (order_id, review_id) = service.create_pair().await?;
    service.delete_order_then_review(order_id, review_id).await?;

    let snapshot = service.inspect_pair(order_id, review_id).await?;
    info!(%snapshot, both_deleted = snapshot.both_soft_deleted(), "Raw rows after delete");
    Ok(())
}

async fn delete_review_first(service: &AssociationService) -> Result<(), StoreError> {
    let (order_id, review_id) = service.create_pair().await?;
    service.delete_review_then_order(order_id, review_id).await?;

    let snapshot = service.inspect_pair(order_id, review_id).await?;
    info!(%snapshot, both_deleted = snapshot.both_soft_deleted(), "Raw rows after delete");
    Ok(())
}

async fn list_all(service: &AssociationService) -> Result<(), StoreError> {
    let all_orders = service.list_orders(Visibility::IncludeDeleted).await?;
    let active_orders = service.list_orders(Visibility::Active).await?;
    let all_reviews = service.list_reviews(Visibility::IncludeDeleted).await?;
    let active_reviews = service.list_reviews(Visibility::Active).await?;

    info!(
        orders = all_orders.len(),
        active_orders = active_orders.len(),
        reviews = all_reviews.len(),
        active_reviews = active_reviews.len(),
        "Row counts with and without the soft-delete filter"
    );
    for order in &all_orders {
        info!(
            order_id = %order.id,
            review_id = ?order.review_id,
            deleted_at = ?order.deletion.deleted_at(),
            "Order row"
        );
    }
    Ok(())
}
