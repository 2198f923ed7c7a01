//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{ttl_from_millis, MAX_KEY_LENGTH};

/// Request body for `PUT /cache/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// Any JSON value
    pub value: Value,
    /// Optional TTL in milliseconds; negative values are treated as 0
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl SetRequest {
    /// Resolves the TTL for this request, falling back to `default`.
    pub fn ttl_or(&self, default: Duration) -> Duration {
        self.ttl_ms.map(ttl_from_millis).unwrap_or(default)
    }
}

/// Query string for `DELETE /cache`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixQuery {
    /// Key prefix to invalidate; absent means every key
    #[serde(default)]
    pub prefix: String,
}

/// Validates a cache key taken from a request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"value": {"foo": "bar"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"foo": "bar"}));
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_set_request_ttl_resolution() {
        let default = Duration::from_secs(60);

        let req: SetRequest = serde_json::from_str(r#"{"value": 1, "ttl_ms": 1500}"#).unwrap();
        assert_eq!(req.ttl_or(default), Duration::from_millis(1500));

        let req: SetRequest = serde_json::from_str(r#"{"value": 1, "ttl_ms": -20}"#).unwrap();
        assert_eq!(req.ttl_or(default), Duration::ZERO);

        let req: SetRequest = serde_json::from_str(r#"{"value": 1}"#).unwrap();
        assert_eq!(req.ttl_or(default), default);
    }

    #[test]
    fn test_prefix_query_defaults_to_empty() {
        let query = PrefixQuery::default();
        assert_eq!(query.prefix, "");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("").is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key("rotation:42").is_none());
    }
}
