use crate::actor_framework::ResourceClient;
use crate::domain::{Review, ReviewId};

/// Client for the `reviews` table.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

impl_resource_client!(ReviewClient, Review, ReviewId, review);
