use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderId};

/// Client for the `orders` table.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(OrderClient, Order, OrderId, order);
