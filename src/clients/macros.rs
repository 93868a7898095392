/// Generates the entity-named CRUD surface of a typed client around its
/// `inner: ResourceClient<_>` field.
macro_rules! impl_resource_client {
    ($client_name:ident, $entity:ty, $id:ty, $entity_name_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    payload: <$entity as $crate::actor_framework::Entity>::CreatePayload,
                ) -> Result<$id, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.create(payload).await
                }

                /// Active record only; a soft-deleted or unknown id is `NotFound`.
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: $id,
                ) -> Result<$entity, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await?.ok_or_else(|| {
                        $crate::error::StoreError::not_found(
                            <$entity as $crate::actor_framework::Entity>::KIND,
                            $crate::domain::RecordId::raw(id),
                        )
                    })
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<find_ $entity_name_snake _including_deleted>](
                    &self,
                    id: $id,
                ) -> Result<Option<$entity>, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.get_including_deleted(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                    visibility: $crate::store::Visibility,
                ) -> Result<Vec<$entity>, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.list(visibility).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: $id,
                ) -> Result<(), $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await
                }
            }
        }
    };
}
