//! Error types

mod api;
mod catalog;
mod store;

pub use api::*;
pub use catalog::*;
pub use store::*;
