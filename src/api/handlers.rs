//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::error::{ApiError, Result};
use crate::models::{
    validate_key, GetResponse, HealthResponse, InvalidateResponse, PrefixInvalidateResponse,
    PrefixQuery, SetRequest, SetResponse, StatsResponse,
};

/// Cache of JSON values shared between handlers and the sweep task.
pub type SharedCache = Arc<RwLock<TtlCache<Value, Arc<dyn Clock>>>>;

/// Application state shared across all handlers.
///
/// Owns the one cache instance of the process; tests build their own.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// TTL for requests that do not carry one
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState with an empty cache on the system clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(SystemClock, default_ttl)
    }

    /// Creates a new AppState with an empty cache driven by `clock`.
    pub fn with_clock(clock: impl Clock + 'static, default_ttl: Duration) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        Self {
            cache: Arc::new(RwLock::new(TtlCache::with_clock(clock))),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.default_ttl())
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(msg) => Err(ApiError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /cache/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    check_key(&key)?;

    let ttl = req.ttl_or(state.default_ttl);
    state.cache.write().await.set(key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(key, ttl.as_millis() as u64)))
}

/// Handler for GET /cache/:key
///
/// A key that was never set and one that has expired both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;

    // Write lock: a lookup may remove an expired entry
    let value = state.cache.write().await.get(&key);

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    check_key(&key)?;

    let removed = state.cache.write().await.invalidate(&key);
    debug!(key = %key, removed, "invalidate request");

    Ok(Json(InvalidateResponse::new(key, removed)))
}

/// Handler for DELETE /cache?prefix=
///
/// A missing prefix matches every key.
pub async fn invalidate_prefix_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Json<PrefixInvalidateResponse> {
    let removed = state
        .cache
        .write()
        .await
        .invalidate_by_prefix(&query.prefix);

    Json(PrefixInvalidateResponse::new(query.prefix, removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
