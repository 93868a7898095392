use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::actor_framework::StoreClient;
use crate::app_system::AssociationService;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::StoreService;

/// Starts the store, wires the clients and handles shutdown.
///
/// Must be started from within a Tokio runtime.
pub struct AssociationSystem {
    pub service: AssociationService,
    store_client: StoreClient,
    handle: JoinHandle<()>,
}

impl AssociationSystem {
    #[instrument(name = "association_system", skip(config), fields(location = ?config.location))]
    pub fn start(config: &StoreConfig) -> Result<Self, StoreError> {
        info!("Starting association system");

        let (store_service, store_client) = StoreService::open(config)?;
        let handle = store_service.spawn();
        let service = AssociationService::new(store_client.clone(), config);

        info!("Association system started");

        Ok(Self {
            service,
            store_client,
            handle,
        })
    }

    /// Stops the store and waits for it to finish. Clones of the service held
    /// elsewhere will get `ActorCommunication` errors afterwards.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), StoreError> {
        info!("Shutting down association system");

        // The store may already be gone; joining below reports real failures.
        let _ = self.store_client.shutdown().await;
        drop(self.service);
        drop(self.store_client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Store task failed");
            return Err(StoreError::ActorCommunication(format!("Store task failed: {}", e)));
        }

        info!("Association system shutdown complete");
        Ok(())
    }
}
