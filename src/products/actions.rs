use std::fmt;

use crate::domain::{Product, ProductDraft};
use super::error::ProductError;

/// The five product operations the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::List,
        OperationKind::Get,
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::Delete,
    ];

    /// Notice shown when a request of this kind succeeds.
    pub fn success_message(self) -> &'static str {
        match self {
            OperationKind::List => "Products loaded successfully",
            OperationKind::Get => "Product loaded successfully",
            OperationKind::Create => "Product created successfully",
            OperationKind::Update => "Product updated successfully",
            OperationKind::Delete => "Product deleted successfully",
        }
    }

    /// Notice shown when a request of this kind fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            OperationKind::List => "Error fetching products",
            OperationKind::Get => "Error fetching product",
            OperationKind::Create => "Error creating product",
            OperationKind::Update => "Error updating product",
            OperationKind::Delete => "Error deleting product",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::List => "list",
            OperationKind::Get => "get",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A request for the dispatcher, one variant per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRequest {
    List,
    Get { id: String },
    Create { draft: ProductDraft },
    Update { id: String, draft: ProductDraft },
    Delete { id: String },
}

impl ProductRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            ProductRequest::List => OperationKind::List,
            ProductRequest::Get { .. } => OperationKind::Get,
            ProductRequest::Create { .. } => OperationKind::Create,
            ProductRequest::Update { .. } => OperationKind::Update,
            ProductRequest::Delete { .. } => OperationKind::Delete,
        }
    }
}

/// Successful dispatcher results - variants match 1:1 with ProductRequest
#[derive(Debug, Clone, PartialEq)]
pub enum ProductReply {
    Listed(Vec<Product>),
    Fetched(Product),
    Created(Product),
    Updated(Product),
    /// Carries the id that was deleted.
    Deleted(String),
}

impl ProductReply {
    pub fn kind(&self) -> OperationKind {
        match self {
            ProductReply::Listed(_) => OperationKind::List,
            ProductReply::Fetched(_) => OperationKind::Get,
            ProductReply::Created(_) => OperationKind::Create,
            ProductReply::Updated(_) => OperationKind::Update,
            ProductReply::Deleted(_) => OperationKind::Delete,
        }
    }
}

/// Lifecycle events understood by the product reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// A request of this kind has started.
    Pending(OperationKind),
    /// A request resolved successfully.
    Fulfilled(ProductReply),
    /// A request failed.
    Rejected {
        kind: OperationKind,
        error: ProductError,
    },
    /// Drop the selected product, e.g. when leaving a detail view.
    ClearSelected,
}
