//! API Module
//!
//! HTTP handlers and routing over the process-wide cache instance.
//!
//! # Endpoints
//! - `PUT /cache/:key` - Store a JSON value with optional TTL
//! - `GET /cache/:key` - Retrieve a live value
//! - `DELETE /cache/:key` - Invalidate one key
//! - `DELETE /cache?prefix=` - Invalidate by key prefix
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
