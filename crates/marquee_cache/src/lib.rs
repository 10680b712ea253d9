//! In-memory caching primitives for the copy pipeline.
//!
//! - [`TtlCache`] memoizes finished results for a short window.
//! - [`RequestCoalescer`] collapses concurrent identical calls into one.
//!
//! Both are cheap to clone; clones share state. Time is read from
//! `tokio::time::Instant`, so a paused tokio clock controls expiry in tests.

mod coalescer;
mod ttl;

pub use coalescer::{CoalescerStats, DEFAULT_PENDING_TIMEOUT, RequestCoalescer};
pub use ttl::{CacheConfig, CacheEntry, DEFAULT_CACHE_TTL, TtlCache};
