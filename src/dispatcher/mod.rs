//! Request dispatcher: performs product requests against a [`ProductApi`] and
//! reports every outcome through a [`Notifier`].

pub mod api;
pub mod http;
pub mod notify;

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::products::{ProductError, ProductReply, ProductRequest};
pub use api::ProductApi;
pub use http::HttpProductApi;
pub use notify::{BroadcastNotifier, Notification, Notifier, TracingNotifier};

#[derive(Clone)]
pub struct RequestDispatcher {
    api: Arc<dyn ProductApi>,
    notifier: Arc<dyn Notifier>,
}

impl RequestDispatcher {
    pub fn new(api: Arc<dyn ProductApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Runs one request and emits exactly one notice for its outcome.
    /// Failures are returned as-is; nothing is retried.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn dispatch(&self, request: ProductRequest) -> Result<ProductReply, ProductError> {
        let kind = request.kind();
        debug!("Dispatching request");
        let result = self.perform(request).await;
        match &result {
            Ok(_) => self.notifier.notify(Notification::success(kind.success_message())),
            Err(e) => {
                warn!(error = %e, "Request failed");
                self.notifier.notify(Notification::error(kind.failure_message()));
            }
        }
        result
    }

    async fn perform(&self, request: ProductRequest) -> Result<ProductReply, ProductError> {
        match request {
            ProductRequest::List => self.api.list_products().await.map(ProductReply::Listed),
            ProductRequest::Get { id } => self.api.get_product(&id).await.map(ProductReply::Fetched),
            ProductRequest::Create { draft } => {
                if let Some(field) = draft.missing_create_field() {
                    return Err(ProductError::Validation(format!("{} is required", field)));
                }
                self.api.create_product(&draft).await.map(ProductReply::Created)
            }
            ProductRequest::Update { id, draft } => {
                self.api.update_product(&id, &draft).await.map(ProductReply::Updated)
            }
            ProductRequest::Delete { id } => {
                self.api.delete_product(&id).await?;
                Ok(ProductReply::Deleted(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductDraft};
    use crate::mock_framework::{create_mock_api, expect_create, expect_delete, expect_list, RecordingNotifier};

    fn dispatcher_with_mock() -> (
        RequestDispatcher,
        tokio::sync::mpsc::Receiver<crate::mock_framework::ApiCall>,
        RecordingNotifier,
    ) {
        let (api, calls) = create_mock_api(10);
        let notifier = RecordingNotifier::default();
        let dispatcher = RequestDispatcher::new(Arc::new(api), Arc::new(notifier.clone()));
        (dispatcher, calls, notifier)
    }

    #[tokio::test]
    async fn test_success_emits_one_success_notice() {
        let (dispatcher, mut calls, notifier) = dispatcher_with_mock();

        let task = tokio::spawn(async move { dispatcher.dispatch(ProductRequest::List).await });
        let responder = expect_list(&mut calls).await.expect("Expected List call");
        responder.send(Ok(vec![Product::new("1", "Phone", 1.0)])).unwrap();

        let reply = task.await.unwrap().unwrap();
        assert_eq!(reply, ProductReply::Listed(vec![Product::new("1", "Phone", 1.0)]));
        assert_eq!(notifier.notices(), vec![Notification::success("Products loaded successfully")]);
    }

    #[tokio::test]
    async fn test_failure_emits_one_error_notice() {
        let (dispatcher, mut calls, notifier) = dispatcher_with_mock();

        let task = tokio::spawn(async move {
            dispatcher.dispatch(ProductRequest::Delete { id: "9".into() }).await
        });
        let (id, responder) = expect_delete(&mut calls).await.expect("Expected Delete call");
        assert_eq!(id, "9");
        responder
            .send(Err(ProductError::Server { status: 403, message: "Forbidden".into() }))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Forbidden");
        assert_eq!(notifier.notices(), vec![Notification::error("Error deleting product")]);
    }

    #[tokio::test]
    async fn test_delete_reply_carries_requested_id() {
        let (dispatcher, mut calls, _notifier) = dispatcher_with_mock();

        let task = tokio::spawn(async move {
            dispatcher.dispatch(ProductRequest::Delete { id: "abc".into() }).await
        });
        let (_, responder) = expect_delete(&mut calls).await.unwrap();
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(ProductReply::Deleted("abc".into())));
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_api() {
        let (dispatcher, mut calls, notifier) = dispatcher_with_mock();

        let result = dispatcher
            .dispatch(ProductRequest::Create { draft: ProductDraft::price(5.0) })
            .await;

        assert_eq!(result, Err(ProductError::Validation("name is required".into())));
        assert_eq!(notifier.notices(), vec![Notification::error("Error creating product")]);
        drop(dispatcher);
        assert!(expect_create(&mut calls).await.is_none());
    }
}
