use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::api::ProductApi;
use crate::domain::{Product, ProductDraft};
use crate::products::ProductError;

const PRODUCTS_PATH: [&str; 3] = ["api", "v1", "products"];

#[derive(Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed client for the `/api/v1/products` REST resource.
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    base: Url,
}

impl HttpProductApi {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ProductError> {
        if base.cannot_be_a_base() {
            return Err(ProductError::InvalidBaseUrl(base.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProductError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // new() rejects cannot-be-a-base URLs, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(PRODUCTS_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProductError> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ProductError::Decode(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, ProductError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let fallback = status.canonical_reason().unwrap_or("Request failed").to_string();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => fallback,
        };
        Err(ProductError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let response = self.client.get(self.endpoint(None)).send().await?;
        let envelope: ProductsEnvelope = Self::decode(response).await?;
        debug!(count = envelope.products.len(), "Products received");
        Ok(envelope.products)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> Result<Product, ProductError> {
        debug!("Sending request");
        let response = self.client.get(self.endpoint(Some(id))).send().await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product)
    }

    #[instrument(skip(self))]
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        let response = self
            .client
            .post(self.endpoint(None))
            .json(draft)
            .send()
            .await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product)
    }

    #[instrument(skip(self))]
    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        let response = self
            .client
            .put(self.endpoint(Some(id)))
            .json(draft)
            .send()
            .await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &str) -> Result<(), ProductError> {
        debug!("Sending request");
        let response = self.client.delete(self.endpoint(Some(id))).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
