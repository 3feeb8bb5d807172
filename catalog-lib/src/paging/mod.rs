//! Incremental result aggregation for infinite scroll.
//!
//! [`Aggregator`] is a synchronous state machine: it is told about query
//! changes, viewport-proximity events and page completions, and answers
//! with the page request (if any) that should go out next. It never does
//! I/O itself. [`SearchSession`] wires it to a [`CatalogClient`](crate::CatalogClient).

mod aggregator;
mod session;

pub use aggregator::*;
pub use session::*;
