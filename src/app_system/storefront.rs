use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info};

use super::config::StorefrontConfig;
use crate::clients::ProductClient;
use crate::dispatcher::{BroadcastNotifier, HttpProductApi, Notification, Notifier, ProductApi, RequestDispatcher};
use crate::products::{ProductError, ProductSlice};
use crate::store_framework::StoreActor;

/// The client-side application system.
///
/// Responsible for starting the store actor, wiring the dispatcher to it, and handling shutdown.
pub struct Storefront {
    pub products: ProductClient,
    notices: Option<BroadcastNotifier>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Builds an HTTP-backed storefront. Must be called inside a tokio runtime.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ProductError> {
        let api = HttpProductApi::new(config.api_base.clone(), config.request_timeout)?;
        let notifier = BroadcastNotifier::new(config.notice_capacity);

        let mut system = Self::with_api(Arc::new(api), Arc::new(notifier.clone()), config.store_buffer);
        system.notices = Some(notifier);
        info!(api_base = %config.api_base, "Storefront started");
        Ok(system)
    }

    /// Builds a storefront over any backend and notifier.
    pub fn with_api(api: Arc<dyn ProductApi>, notifier: Arc<dyn Notifier>, store_buffer: usize) -> Self {
        let (store_actor, store_client) = StoreActor::<ProductSlice>::new(store_buffer);
        let store_handle = tokio::spawn(store_actor.run());

        let dispatcher = RequestDispatcher::new(api, notifier);
        let products = ProductClient::new(dispatcher, store_client);

        Self {
            products,
            notices: None,
            handles: vec![store_handle],
        }
    }

    /// Stream of transient notices, when the storefront owns the notifier.
    pub fn notices(&self) -> Option<broadcast::Receiver<Notification>> {
        self.notices.as_ref().map(BroadcastNotifier::subscribe)
    }

    /// Drops this system's handles and waits for the store actor to stop.
    ///
    /// Clones of the product client held elsewhere (including spawned
    /// requests) keep the actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
