use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::dispatcher::RequestDispatcher;
use crate::domain::{Product, ProductDraft};
use crate::products::{ProductAction, ProductError, ProductReply, ProductRequest, ProductSlice, RequestState};
use crate::store_framework::StoreClient;

/// Entry point for UI consumers.
///
/// Every operation walks the same lifecycle: `Pending` is applied to the
/// store, the dispatcher performs the request, then `Fulfilled` or `Rejected`
/// is applied. The caller also gets the outcome directly.
#[derive(Clone)]
pub struct ProductClient {
    dispatcher: RequestDispatcher,
    store: StoreClient<ProductSlice>,
}

#[allow(dead_code)]
impl ProductClient {
    pub fn new(dispatcher: RequestDispatcher, store: StoreClient<ProductSlice>) -> Self {
        Self { dispatcher, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ProductError> {
        match self.run(ProductRequest::List).await? {
            ProductReply::Listed(products) => {
                info!(count = products.len(), "Products fetched");
                Ok(products)
            }
            other => Err(ProductError::UnexpectedReply(other.kind())),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: String) -> Result<Product, ProductError> {
        match self.run(ProductRequest::Get { id }).await? {
            ProductReply::Fetched(product) => Ok(product),
            other => Err(ProductError::UnexpectedReply(other.kind())),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        match self.run(ProductRequest::Create { draft }).await? {
            ProductReply::Created(product) => {
                info!(product_id = %product.id, "Product created");
                Ok(product)
            }
            other => Err(ProductError::UnexpectedReply(other.kind())),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, draft: ProductDraft) -> Result<Product, ProductError> {
        match self.run(ProductRequest::Update { id, draft }).await? {
            ProductReply::Updated(product) => Ok(product),
            other => Err(ProductError::UnexpectedReply(other.kind())),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: String) -> Result<(), ProductError> {
        match self.run(ProductRequest::Delete { id }).await? {
            ProductReply::Deleted(_) => Ok(()),
            other => Err(ProductError::UnexpectedReply(other.kind())),
        }
    }

    pub async fn clear_selected(&self) -> Result<(), ProductError> {
        self.store.dispatch(ProductAction::ClearSelected).await?;
        Ok(())
    }

    /// Runs a request on its own task. Dropping the handle does not cancel it.
    pub fn spawn(&self, request: ProductRequest) -> JoinHandle<Result<ProductReply, ProductError>> {
        let client = self.clone();
        tokio::spawn(async move { client.run(request).await })
    }

    pub async fn state(&self) -> Result<RequestState, ProductError> {
        Ok(self.store.snapshot().await?)
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.store.subscribe()
    }

    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    async fn run(&self, request: ProductRequest) -> Result<ProductReply, ProductError> {
        let kind = request.kind();
        debug!("Sending request");
        self.store.dispatch(ProductAction::Pending(kind)).await?;

        match self.dispatcher.dispatch(request).await {
            Ok(reply) => {
                self.store.dispatch(ProductAction::Fulfilled(reply.clone())).await?;
                Ok(reply)
            }
            Err(error) => {
                self.store
                    .dispatch(ProductAction::Rejected { kind, error: error.clone() })
                    .await?;
                Err(error)
            }
        }
    }
}
