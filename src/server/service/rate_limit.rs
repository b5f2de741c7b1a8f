//! Per-address submission rate limiting over a persisted attempt log.
//!
//! Enforcement fails open: if the store is unreachable the submission is
//! allowed and the degradation is logged, trading strictness for
//! availability.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::data::RateLimitRepository;

#[derive(Clone, Copy, Debug)]
pub struct RateLimitPolicy {
    pub max_requests: u64,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_requests: u64, window_secs: i64) -> Self {
        Self {
            max_requests,
            window: Duration::seconds(window_secs),
        }
    }
}

/// Returns whether this attempt is allowed, recording it when it is.
pub async fn check(db: &DatabaseConnection, ip_address: &str, policy: &RateLimitPolicy) -> bool {
    let since = Utc::now().naive_utc() - policy.window;
    let repo = RateLimitRepository::new(db);

    match repo.count_since(ip_address, since).await {
        Ok(count) if count >= policy.max_requests => false,
        Ok(_) => {
            if let Err(error) = repo.record(ip_address).await {
                tracing::warn!(%error, ip_address, "failed to record rate limit attempt");
            }
            true
        }
        Err(error) => {
            tracing::warn!(%error, ip_address, "rate limit store unavailable, allowing request");
            true
        }
    }
}

/// Drops attempt log entries older than twice the window. Called
/// opportunistically after successful submissions.
pub async fn sweep(db: &DatabaseConnection, policy: &RateLimitPolicy) {
    let cutoff = Utc::now().naive_utc() - policy.window * 2;

    if let Err(error) = RateLimitRepository::new(db).delete_older_than(cutoff).await {
        tracing::warn!(%error, "failed to sweep rate limit entries");
    }
}
