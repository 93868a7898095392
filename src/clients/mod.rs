//! Typed per-table clients over the shared store channel.

#[macro_use]
mod macros;

pub mod order_client;
pub mod review_client;

pub use order_client::OrderClient;
pub use review_client::ReviewClient;
