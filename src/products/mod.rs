//! Product slice: lifecycle actions, request state, the reducer and read-side selectors.

mod actions;
pub mod error;
pub mod reducer;
pub mod selectors;
mod state;

pub use actions::*;
pub use error::*;
pub use reducer::ProductSlice;
pub use state::*;
