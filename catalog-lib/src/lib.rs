//! Media catalog client library
//!
//! Cached, rate-limited lookups against a remote media catalog, infinite
//! scroll aggregation of search pages, and a persisted favorites set.

pub mod api;
pub mod cache;
pub mod error;
pub mod favorites;
pub mod model;
pub mod paging;
pub mod rate_limit;
pub mod transport;

mod client;

pub use client::*;
pub use error::Error;
