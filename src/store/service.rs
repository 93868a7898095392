use chrono::Utc;
use rusqlite::Connection;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::{Entity, ResourceRequest, Response, StoreClient, StoreRequest};
use crate::config::StoreConfig;
use crate::domain::{Order, OrderCreate, OrderId, RecordId, Review, ReviewCreate, ReviewId};
use crate::error::StoreError;
use crate::store::{repository, schema, Visibility};

/// Owns the SQLite connection and serves [`StoreRequest`]s one at a time.
///
/// Every request is its own unit of work: single statements run in
/// autocommit, `CreatePair` runs inside an explicit transaction.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    conn: Connection,
}

impl StoreService {
    pub fn new(conn: Connection, buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, conn };
        (service, StoreClient::new(sender))
    }

    pub fn open(config: &StoreConfig) -> Result<(Self, StoreClient), StoreError> {
        let conn = schema::open(&config.location)?;
        Ok(Self::new(conn, config.channel_buffer))
    }

    /// Runs the service on the blocking pool; SQLite calls are synchronous.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || self.run())
    }

    /// Stops on `Shutdown` or once every client is dropped.
    #[instrument(name = "store_service", skip(self))]
    pub fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.blocking_recv() {
            match msg {
                StoreRequest::Orders(request) => self.handle_resource(request),
                StoreRequest::Reviews(request) => self.handle_resource(request),
                StoreRequest::CreatePair {
                    review,
                    order_number,
                    respond_to,
                } => self.handle_create_pair(review, order_number, respond_to),
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }

        info!("StoreService stopped");
    }

    fn handle_resource<T: Entity>(&mut self, request: ResourceRequest<T>) {
        match request {
            ResourceRequest::Create {
                payload,
                respond_to,
            } => self.handle_create::<T>(payload, respond_to),
            ResourceRequest::Get {
                id,
                visibility,
                respond_to,
            } => self.handle_get::<T>(id, visibility, respond_to),
            ResourceRequest::List {
                visibility,
                respond_to,
            } => self.handle_list::<T>(visibility, respond_to),
            ResourceRequest::Delete { id, respond_to } => self.handle_delete::<T>(id, respond_to),
        }
    }

    #[instrument(fields(kind = %T::KIND), skip(self, payload, respond_to))]
    fn handle_create<T: Entity>(&mut self, payload: T::CreatePayload, respond_to: Response<T::Id>) {
        debug!(?payload, "Processing create request");

        let result = repository::insert::<T>(&self.conn, &payload, Utc::now());
        match &result {
            Ok(id) => info!(id = %id, "Record created"),
            Err(e) => error!(error = %e, "Record creation failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(kind = %T::KIND, id = %id), skip(self, id, respond_to))]
    fn handle_get<T: Entity>(
        &self,
        id: T::Id,
        visibility: Visibility,
        respond_to: Response<Option<T>>,
    ) {
        debug!("Processing get request");

        let result = repository::find::<T>(&self.conn, id, visibility);
        match &result {
            Ok(Some(record)) => {
                info!(deleted = record.deletion().is_deleted(), "Record found")
            }
            Ok(None) => debug!("Record not found"),
            Err(e) => error!(error = %e, "Record lookup failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(kind = %T::KIND), skip(self, respond_to))]
    fn handle_list<T: Entity>(&self, visibility: Visibility, respond_to: Response<Vec<T>>) {
        debug!("Processing list request");

        let result = repository::list::<T>(&self.conn, visibility);
        match &result {
            Ok(records) => info!(count = records.len(), "Listed records"),
            Err(e) => error!(error = %e, "Listing failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(kind = %T::KIND, id = %id), skip(self, id, respond_to))]
    fn handle_delete<T: Entity>(&mut self, id: T::Id, respond_to: Response<()>) {
        debug!("Processing soft delete request");

        let result = repository::soft_delete::<T>(&self.conn, id, Utc::now());
        match &result {
            Ok(()) => info!("Record soft-deleted"),
            Err(StoreError::NotFound { .. }) => info!("No active record to delete"),
            Err(e) => error!(error = %e, "Soft delete failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_number = %order_number), skip(self, review, order_number, respond_to))]
    fn handle_create_pair(
        &mut self,
        review: ReviewCreate,
        order_number: String,
        respond_to: Response<(OrderId, ReviewId)>,
    ) {
        debug!("Processing create_pair request");

        let result = self.create_pair(&review, order_number);
        match &result {
            Ok((order_id, review_id)) => info!(
                order_id = order_id.raw(),
                review_id = review_id.raw(),
                "Order and review created"
            ),
            Err(e) => error!(error = %e, "Pair creation failed, nothing committed"),
        }

        let _ = respond_to.send(result);
    }

    fn create_pair(
        &mut self,
        review: &ReviewCreate,
        order_number: String,
    ) -> Result<(OrderId, ReviewId), StoreError> {
        let now = Utc::now();
        let tx = self.conn.transaction()?;

        let review_id = repository::insert::<Review>(&tx, review, now)?;
        let order = OrderCreate::new(order_number).with_review(review_id);
        let order_id = repository::insert::<Order>(&tx, &order, now)?;

        tx.commit()?;
        Ok((order_id, review_id))
    }
}
