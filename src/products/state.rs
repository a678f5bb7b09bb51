use std::collections::BTreeMap;

use crate::domain::Product;
use super::{OperationKind, ProductError};

/// Where the most recent request of one operation kind stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

/// Client-held snapshot of product data and request status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestState {
    /// Server reply order, plus creations appended in resolution order.
    pub products: Vec<Product>,
    pub selected: Option<Product>,
    pub pending: bool,
    pub failure: Option<ProductError>,
    statuses: BTreeMap<OperationKind, RequestStatus>,
}

#[allow(dead_code)]
impl RequestState {
    pub fn status(&self, kind: OperationKind) -> RequestStatus {
        self.statuses.get(&kind).copied().unwrap_or_default()
    }

    pub(super) fn set_status(&mut self, kind: OperationKind, status: RequestStatus) {
        self.statuses.insert(kind, status);
    }

    pub fn failure_message(&self) -> Option<String> {
        self.failure.as_ref().map(|e| e.to_string())
    }

    /// True when nothing has been requested yet and no failure is held.
    pub fn is_idle(&self) -> bool {
        !self.pending
            && self.failure.is_none()
            && OperationKind::ALL
                .iter()
                .all(|kind| self.status(*kind) == RequestStatus::Idle)
    }
}
