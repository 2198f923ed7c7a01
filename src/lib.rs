//! Ephemeral Cache - an in-process key-value cache with TTL expiry
//!
//! Entries expire lazily on read, can be invalidated one at a time or by key
//! prefix, and are stamped by an injectable clock. A small HTTP service hosts
//! one cache instance for request handlers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use config::Config;
pub use tasks::spawn_sweep_task;
