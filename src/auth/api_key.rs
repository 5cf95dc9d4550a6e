//! In-memory API key registry
//!
//! Keys live only as long as the process. The registry is not consulted when
//! authorizing gateway requests; it backs the `/api-key` management routes.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::utils::error::{GatewayError, Result};

/// Length of generated keys
pub const API_KEY_LENGTH: usize = 32;

/// Lifetime of a freshly generated key
pub const DEFAULT_KEY_LIFETIME_DAYS: i64 = 30;

/// A registered API key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub key: String,
    pub expires_at: DateTime<Utc>,
    pub is_blocked: bool,
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl ApiKey {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    key: ApiKey,
}

/// Concurrent registry of API keys
#[derive(Debug, Default)]
pub struct ApiKeyRegistry {
    keys: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

fn not_found() -> GatewayError {
    GatewayError::not_found("API key not found")
}

/// Random alphanumeric key
pub fn generate_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect()
}

impl ApiKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new key that expires in [`DEFAULT_KEY_LIFETIME_DAYS`]
    pub fn create(&self) -> ApiKey {
        let api_key = ApiKey {
            key: generate_key(),
            expires_at: Utc::now() + Duration::days(DEFAULT_KEY_LIFETIME_DAYS),
            is_blocked: false,
            usage_count: 0,
            last_used: None,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.keys.insert(
            api_key.key.clone(),
            Entry {
                seq,
                key: api_key.clone(),
            },
        );
        info!(expires_at = %api_key.expires_at, "Generated API key");
        api_key
    }

    /// All keys in creation order
    pub fn list(&self) -> Vec<ApiKey> {
        let mut entries: Vec<(u64, ApiKey)> = self
            .keys
            .iter()
            .map(|entry| (entry.seq, entry.key.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, key)| key).collect()
    }

    pub fn get(&self, key: &str) -> Option<ApiKey> {
        self.keys.get(key).map(|entry| entry.key.clone())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn update<F: FnOnce(&mut ApiKey)>(&self, key: &str, apply: F) -> Result<ApiKey> {
        let mut entry = self.keys.get_mut(key).ok_or_else(not_found)?;
        apply(&mut entry.key);
        Ok(entry.key.clone())
    }

    pub fn block(&self, key: &str) -> Result<ApiKey> {
        let updated = self.update(key, |k| k.is_blocked = true)?;
        info!("Blocked API key");
        Ok(updated)
    }

    pub fn unblock(&self, key: &str) -> Result<ApiKey> {
        let updated = self.update(key, |k| k.is_blocked = false)?;
        info!("Unblocked API key");
        Ok(updated)
    }

    pub fn update_expiration(&self, key: &str, expires_at: DateTime<Utc>) -> Result<ApiKey> {
        let updated = self.update(key, |k| k.expires_at = expires_at)?;
        info!(expires_at = %expires_at, "Updated API key expiration");
        Ok(updated)
    }

    /// Count one use of `key`; unknown keys are ignored
    pub fn increment_usage(&self, key: &str) {
        if let Some(mut entry) = self.keys.get_mut(key) {
            entry.key.usage_count += 1;
            entry.key.last_used = Some(Utc::now());
        } else {
            debug!("Usage recorded for unknown API key");
        }
    }
}
