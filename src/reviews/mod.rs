//! Review table mapping.

pub mod entity;
