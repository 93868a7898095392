//! Soft-delete data access, generic over [`Entity`].
//!
//! The `deleted_at IS NULL` predicate is attached here and nowhere else.
//! Deletes are updates; no function in this module removes a row.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::actor_framework::Entity;
use crate::domain::RecordId;
use crate::error::StoreError;

const ACTIVE: &str = "deleted_at IS NULL";

/// Whether a read applies the soft-delete filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Active,
    /// Bypass read: soft-deleted rows are returned too.
    IncludeDeleted,
}

impl Visibility {
    fn predicate(self) -> Option<&'static str> {
        match self {
            Visibility::Active => Some(ACTIVE),
            Visibility::IncludeDeleted => None,
        }
    }
}

pub fn insert<T: Entity>(
    conn: &Connection,
    payload: &T::CreatePayload,
    now: DateTime<Utc>,
) -> Result<T::Id, StoreError> {
    Ok(T::insert(conn, payload, now)?)
}

pub fn find<T: Entity>(
    conn: &Connection,
    id: T::Id,
    visibility: Visibility,
) -> Result<Option<T>, StoreError> {
    let mut sql = format!("SELECT {} FROM {} WHERE id = ?1", T::COLUMNS, T::TABLE);
    if let Some(predicate) = visibility.predicate() {
        sql.push_str(" AND ");
        sql.push_str(predicate);
    }

    let found = conn
        .query_row(&sql, params![id.raw()], T::from_row)
        .optional()?;
    Ok(found)
}

pub fn list<T: Entity>(conn: &Connection, visibility: Visibility) -> Result<Vec<T>, StoreError> {
    let mut sql = format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE);
    if let Some(predicate) = visibility.predicate() {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], T::from_row)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

/// Stamps `deleted_at` on an active row.
///
/// A missing id and an already deleted row both yield `NotFound`, so a second
/// delete of the same id is an error rather than a silent success.
pub fn soft_delete<T: Entity>(
    conn: &Connection,
    id: T::Id,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let sql = format!(
        "UPDATE {} SET deleted_at = ?1 WHERE id = ?2 AND {}",
        T::TABLE,
        ACTIVE
    );
    let changed = conn.execute(&sql, params![now, id.raw()])?;
    if changed == 0 {
        return Err(StoreError::not_found(T::KIND, id.raw()));
    }
    Ok(())
}
