//! Catalog lookups

mod details;
mod envelope;
mod key;
mod search;
mod suggest;

pub use details::*;
pub use envelope::*;
pub use key::*;
pub use search::*;
pub use suggest::*;
