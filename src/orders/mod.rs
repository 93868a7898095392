//! Order table mapping.

pub mod entity;
