use crate::domain::Product;
use crate::store_framework::Reducer;
use super::{ProductAction, ProductReply, RequestState, RequestStatus};

/// Reducer for the product slice of the store.
#[derive(Debug)]
pub struct ProductSlice;

impl Reducer for ProductSlice {
    type State = RequestState;
    type Action = ProductAction;

    fn reduce(state: &mut RequestState, action: ProductAction) {
        match action {
            ProductAction::Pending(kind) => {
                state.pending = true;
                state.failure = None;
                state.set_status(kind, RequestStatus::Pending);
            }
            ProductAction::Fulfilled(reply) => {
                state.pending = false;
                state.set_status(reply.kind(), RequestStatus::Fulfilled);
                apply_reply(state, reply);
            }
            ProductAction::Rejected { kind, error } => {
                state.pending = false;
                state.failure = Some(error);
                state.set_status(kind, RequestStatus::Rejected);
            }
            ProductAction::ClearSelected => {
                state.selected = None;
            }
        }
    }
}

fn apply_reply(state: &mut RequestState, reply: ProductReply) {
    match reply {
        ProductReply::Listed(products) => state.products = products,
        ProductReply::Fetched(product) => state.selected = Some(product),
        ProductReply::Created(product) => {
            // A create racing a list can already have delivered this id.
            match position(&state.products, &product.id) {
                Some(index) => state.products[index] = product,
                None => state.products.push(product),
            }
        }
        ProductReply::Updated(product) => {
            if let Some(index) = position(&state.products, &product.id) {
                state.products[index] = product.clone();
            }
            if state.selected.as_ref().is_some_and(|p| p.id == product.id) {
                state.selected = Some(product);
            }
        }
        ProductReply::Deleted(id) => {
            state.products.retain(|p| p.id != id);
            if state.selected.as_ref().is_some_and(|p| p.id == id) {
                state.selected = None;
            }
        }
    }
}

fn position(products: &[Product], id: &str) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}
