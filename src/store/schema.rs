use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::DatabaseLocation;
use crate::error::StoreError;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS reviews (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        content     TEXT NOT NULL,
        rating      INTEGER NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        deleted_at  TEXT
    );

    CREATE TABLE IF NOT EXISTS orders (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        order_number  TEXT NOT NULL,
        review_id     INTEGER REFERENCES reviews(id),
        created_at    TEXT NOT NULL,
        updated_at    TEXT NOT NULL,
        deleted_at    TEXT
    );
";

/// Opens the database and brings the schema up to date.
pub fn open(location: &DatabaseLocation) -> Result<Connection, StoreError> {
    let conn = match location {
        DatabaseLocation::InMemory => Connection::open_in_memory()?,
        DatabaseLocation::File(path) => {
            info!(path = %path.display(), "Opening database file");
            Connection::open(path)?
        }
    };
    migrate(&conn)?;
    Ok(conn)
}

/// Idempotent; safe to run against an existing file.
pub fn migrate(conn: &Connection) -> Result<(), StoreError> {
    debug!("Applying schema");
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap();
        names
    }

    #[test]
    fn test_creates_both_tables() {
        let conn = open(&DatabaseLocation::InMemory).unwrap();
        assert_eq!(table_names(&conn), vec!["orders", "reviews"]);

        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_migrate_twice_is_harmless() {
        let conn = open(&DatabaseLocation::InMemory).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(table_names(&conn), vec!["orders", "reviews"]);
    }
}
