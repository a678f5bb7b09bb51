use async_trait::async_trait;

use crate::domain::{Product, ProductDraft};
use crate::products::ProductError;

/// Network seam for the product backend.
///
/// The HTTP implementation lives in [`super::http`]; tests substitute a
/// channel-backed fake so responses can be scripted and reordered.
#[async_trait]
pub trait ProductApi: Send + Sync + 'static {
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    async fn get_product(&self, id: &str) -> Result<Product, ProductError>;

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ProductError>;

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ProductError>;

    async fn delete_product(&self, id: &str) -> Result<(), ProductError>;
}
