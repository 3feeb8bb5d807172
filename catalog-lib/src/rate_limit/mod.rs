//! Outbound call throttling.

mod limiter;

pub use limiter::RateLimiter;
