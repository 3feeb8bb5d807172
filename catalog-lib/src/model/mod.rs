//! Catalog data types

mod details;
mod filters;
mod item;
mod page;

pub use details::*;
pub use filters::*;
pub use item::*;
pub use page::*;

/// Placeholder the remote uses for a field it has no value for.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns `None` for empty strings and the remote's "N/A" placeholder.
pub(crate) fn available(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}
