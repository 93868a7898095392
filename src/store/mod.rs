//! SQLite-backed storage: schema, the soft-delete repository and the service
//! that owns the connection.

pub mod repository;
pub mod schema;
pub mod service;

pub use repository::Visibility;
pub use service::StoreService;
