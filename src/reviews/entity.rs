use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::actor_framework::{Entity, ResourceRequest, StoreRequest};
use crate::domain::{Deletion, EntityKind, Review, ReviewCreate, ReviewId};

impl Entity for Review {
    type Id = ReviewId;
    type CreatePayload = ReviewCreate;

    const KIND: EntityKind = EntityKind::Review;
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static str = "id, content, rating, created_at, updated_at, deleted_at";

    fn deletion(&self) -> &Deletion {
        &self.deletion
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ReviewId(row.get(0)?),
            content: row.get(1)?,
            rating: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            deletion: Deletion::from(row.get::<_, Option<DateTime<Utc>>>(5)?),
        })
    }

    fn insert(conn: &Connection, payload: &ReviewCreate, now: DateTime<Utc>) -> rusqlite::Result<ReviewId> {
        conn.execute(
            "INSERT INTO reviews (content, rating, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![payload.content, payload.rating, now],
        )?;
        Ok(ReviewId(conn.last_insert_rowid()))
    }

    fn into_store_request(request: ResourceRequest<Self>) -> StoreRequest {
        StoreRequest::Reviews(request)
    }

    fn from_store_request(request: StoreRequest) -> Result<ResourceRequest<Self>, StoreRequest> {
        match request {
            StoreRequest::Reviews(request) => Ok(request),
            other => Err(other),
        }
    }
}
