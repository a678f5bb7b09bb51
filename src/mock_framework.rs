//! # Mock Framework
//!
//! Utilities for testing the dispatcher and product client in isolation.
//!
//! Use [`create_mock_api`] to get a [`ProductApi`] and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_update`] to assert the
//! calls and answer them, in any order the test needs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::dispatcher::{Notification, Notifier, ProductApi};
use crate::domain::{Product, ProductDraft};
use crate::products::ProductError;

pub type Reply<T> = oneshot::Sender<Result<T, ProductError>>;

/// One call made against the mock backend, holding the channel to answer it.
#[derive(Debug)]
pub enum ApiCall {
    List { respond_to: Reply<Vec<Product>> },
    Get { id: String, respond_to: Reply<Product> },
    Create { draft: ProductDraft, respond_to: Reply<Product> },
    Update { id: String, draft: ProductDraft, respond_to: Reply<Product> },
    Delete { id: String, respond_to: Reply<()> },
}

/// A [`ProductApi`] whose calls arrive on a channel the test controls.
pub struct MockProductApi {
    sender: mpsc::Sender<ApiCall>,
}

/// Creates a mock API and a receiver for asserting and answering calls.
///
/// Because each call waits on its own oneshot, a test can hold several calls
/// and resolve them out of order to simulate racing requests.
pub fn create_mock_api(buffer_size: usize) -> (MockProductApi, mpsc::Receiver<ApiCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockProductApi { sender }, receiver)
}

impl MockProductApi {
    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> ApiCall) -> Result<T, ProductError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ProductError::Network("Mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| ProductError::Network("Mock backend dropped the call".to_string()))?
    }
}

#[async_trait]
impl ProductApi for MockProductApi {
    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.call(|respond_to| ApiCall::List { respond_to }).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, ProductError> {
        let id = id.to_string();
        self.call(|respond_to| ApiCall::Get { id, respond_to }).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ProductError> {
        let draft = draft.clone();
        self.call(|respond_to| ApiCall::Create { draft, respond_to }).await
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ProductError> {
        let (id, draft) = (id.to_string(), draft.clone());
        self.call(|respond_to| ApiCall::Update { id, draft, respond_to }).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ProductError> {
        let id = id.to_string();
        self.call(|respond_to| ApiCall::Delete { id, respond_to }).await
    }
}

/// Helper to verify that the next call is a List request
pub async fn expect_list(receiver: &mut mpsc::Receiver<ApiCall>) -> Option<Reply<Vec<Product>>> {
    match receiver.recv().await {
        Some(ApiCall::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is a Get request
pub async fn expect_get(receiver: &mut mpsc::Receiver<ApiCall>) -> Option<(String, Reply<Product>)> {
    match receiver.recv().await {
        Some(ApiCall::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a Create request
pub async fn expect_create(receiver: &mut mpsc::Receiver<ApiCall>) -> Option<(ProductDraft, Reply<Product>)> {
    match receiver.recv().await {
        Some(ApiCall::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an Update request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ApiCall>,
) -> Option<(String, ProductDraft, Reply<Product>)> {
    match receiver.recv().await {
        Some(ApiCall::Update { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a Delete request
pub async fn expect_delete(receiver: &mut mpsc::Receiver<ApiCall>) -> Option<(String, Reply<()>)> {
    match receiver.recv().await {
        Some(ApiCall::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Notifier that keeps every notice for later assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notification> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notification) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api(10);

        let get_task = tokio::spawn(async move { api.get_product("product_1").await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get call");
        assert_eq!(id, "product_1");
        responder.send(Ok(Product::new("product_1", "Test", 1.0))).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result, Ok(Product::new("product_1", "Test", 1.0)));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_network_error() {
        let (api, mut receiver) = create_mock_api(10);

        let list_task = tokio::spawn(async move { api.list_products().await });
        drop(expect_list(&mut receiver).await.expect("Expected List call"));

        assert!(matches!(list_task.await.unwrap(), Err(ProductError::Network(_))));
    }
}
