//! Account lockout policy.
//!
//! Pure decision logic over a user's failed-login counter and lock
//! timestamp. Callers persist the resulting state immediately so that
//! concurrent login attempts observe accumulated failures. The lock check
//! always precedes the credential check, and is evaluated against
//! wall-clock time: a lock timestamp in the past is equivalent to
//! "not locked".

use chrono::{DateTime, Duration, Utc};

use crate::config::AuthConfig;

/// Outcome of registering a failed password check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// New value for the attempt counter
    pub attempts: i64,
    /// New lock expiry (RFC 3339), if the failure crossed the threshold
    pub lock_until: Option<String>,
}

/// Config-driven lockout policy
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    max_attempts: u32,
    lock_duration: Duration,
}

impl LockoutPolicy {
    pub fn new(max_attempts: u32, lock_duration: Duration) -> Self {
        Self {
            max_attempts,
            lock_duration,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.max_login_attempts,
            Duration::seconds(config.lockout_secs as i64),
        )
    }

    /// Whether the account is locked at `now`. A missing, stale or
    /// unparseable lock timestamp all read as unlocked.
    pub fn is_locked(&self, lock_until: Option<&str>, now: DateTime<Utc>) -> bool {
        match lock_until.and_then(parse_timestamp) {
            Some(until) => until > now,
            None => false,
        }
    }

    /// Register a failed password check and compute the next state.
    ///
    /// An expired lock restarts the counter at 1 rather than accumulating
    /// across lockout windows. Crossing the threshold sets a fresh lock
    /// expiry.
    pub fn register_failure(
        &self,
        attempts: i64,
        lock_until: Option<&str>,
        now: DateTime<Utc>,
    ) -> FailedAttempt {
        let lock_expired = lock_until
            .and_then(parse_timestamp)
            .map(|until| until <= now)
            .unwrap_or(false);

        let attempts = if lock_expired { 1 } else { attempts + 1 };

        let lock_until = if attempts >= i64::from(self.max_attempts) {
            Some((now + self.lock_duration).to_rfc3339())
        } else {
            None
        };

        FailedAttempt {
            attempts,
            lock_until,
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
