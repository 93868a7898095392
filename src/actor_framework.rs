use std::fmt::Debug;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Deletion, EntityKind, Order, OrderId, RecordId, Review, ReviewCreate, ReviewId};
use crate::error::StoreError;
use crate::store::Visibility;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A soft-deletable table the store knows how to read and write.
pub trait Entity: Clone + Send + Sync + Debug + 'static {
    type Id: RecordId;
    type CreatePayload: Send + Sync + Debug;

    const KIND: EntityKind;
    const TABLE: &'static str;
    /// Select list, in the order [`Entity::from_row`] reads it.
    const COLUMNS: &'static str;

    fn deletion(&self) -> &Deletion;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Insert a fresh active row and return the id the store assigned.
    fn insert(
        conn: &Connection,
        payload: &Self::CreatePayload,
        now: DateTime<Utc>,
    ) -> rusqlite::Result<Self::Id>;

    // --- Routing through the shared store channel ---

    fn into_store_request(request: ResourceRequest<Self>) -> StoreRequest;

    #[allow(dead_code)]
    fn from_store_request(request: StoreRequest) -> Result<ResourceRequest<Self>, StoreRequest>;
}

// =============================================================================
// 2. THE MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        visibility: Visibility,
        respond_to: Response<Option<T>>,
    },
    List {
        visibility: Visibility,
        respond_to: Response<Vec<T>>,
    },
    /// Soft delete. Fails with `NotFound` when no active row has the id.
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

/// Everything the store service accepts. One channel carries every table so
/// that a single connection owner serializes all work.
#[derive(Debug)]
pub enum StoreRequest {
    Orders(ResourceRequest<Order>),
    Reviews(ResourceRequest<Review>),
    /// Review plus the order pointing at it, committed as one transaction.
    CreatePair {
        review: ReviewCreate,
        order_number: String,
        respond_to: Response<(OrderId, ReviewId)>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE CLIENTS
// =============================================================================

fn closed() -> StoreError {
    StoreError::ActorCommunication("Store closed".to_string())
}

fn dropped() -> StoreError {
    StoreError::ActorCommunication("Store dropped".to_string())
}

/// Handle to the store service.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Typed view of one table over the same channel.
    pub fn resource<T: Entity>(&self) -> ResourceClient<T> {
        ResourceClient {
            sender: self.sender.clone(),
            _entity: PhantomData,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_pair(
        &self,
        review: ReviewCreate,
        order_number: String,
    ) -> Result<(OrderId, ReviewId), StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::CreatePair {
                review,
                order_number,
                respond_to,
            })
            .await
            .map_err(|_| closed())?;
        response.await.map_err(|_| dropped())?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| closed())
    }
}

/// Generic CRUD client for one [`Entity`].
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<StoreRequest>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(T::into_store_request(build(respond_to)))
            .await
            .map_err(|_| closed())?;
        response.await.map_err(|_| dropped())?
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    /// Active rows only.
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| ResourceRequest::Get {
            id,
            visibility: Visibility::Active,
            respond_to,
        })
        .await
    }

    /// Bypasses the soft-delete filter.
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn get_including_deleted(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| ResourceRequest::Get {
            id,
            visibility: Visibility::IncludeDeleted,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn list(&self, visibility: Visibility) -> Result<Vec<T>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| ResourceRequest::List {
            visibility,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
