//! Cache Module
//!
//! In-process key-value cache with per-entry TTL, lazy expiry and prefix invalidation.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{ttl_from_millis, CacheEntry};
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Maximum key length in bytes accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
