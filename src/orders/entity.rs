use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::actor_framework::{Entity, ResourceRequest, StoreRequest};
use crate::domain::{Deletion, EntityKind, Order, OrderCreate, OrderId, ReviewId};

impl Entity for Order {
    type Id = OrderId;
    type CreatePayload = OrderCreate;

    const KIND: EntityKind = EntityKind::Order;
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static str = "id, order_number, review_id, created_at, updated_at, deleted_at";

    fn deletion(&self) -> &Deletion {
        &self.deletion
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: OrderId(row.get(0)?),
            order_number: row.get(1)?,
            review_id: row.get::<_, Option<i64>>(2)?.map(ReviewId),
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            deletion: Deletion::from(row.get::<_, Option<DateTime<Utc>>>(5)?),
        })
    }

    /// Inserts the order. The review reference is written as given; it only
    /// has to name an existing review row, deleted or not.
    fn insert(conn: &Connection, payload: &OrderCreate, now: DateTime<Utc>) -> rusqlite::Result<OrderId> {
        conn.execute(
            "INSERT INTO orders (order_number, review_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![payload.order_number, payload.review_id.map(|id| id.0), now],
        )?;
        Ok(OrderId(conn.last_insert_rowid()))
    }

    fn into_store_request(request: ResourceRequest<Self>) -> StoreRequest {
        StoreRequest::Orders(request)
    }

    fn from_store_request(request: StoreRequest) -> Result<ResourceRequest<Self>, StoreRequest> {
        match request {
            StoreRequest::Orders(request) => Ok(request),
            other => Err(other),
        }
    }
}
