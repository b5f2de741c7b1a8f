//! Failed-attempt lockout as a pure state machine, testable without a
//! database. The repositories persist whatever these transitions decide.

use chrono::{Duration, NaiveDateTime};

#[derive(Clone, Copy, Debug)]
pub struct LockoutPolicy {
    pub max_attempts: i32,
    pub lockout: Duration,
}

/// Whether an account may attempt a login right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStanding {
    Clear,
    Locked { until: NaiveDateTime },
}

/// Result of registering one more failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureOutcome {
    AttemptsRemaining { attempts: i32, remaining: i32 },
    LockedOut { attempts: i32, until: NaiveDateTime },
}

impl LockoutPolicy {
    pub fn new(max_attempts: i32, lockout_secs: i64) -> Self {
        Self {
            max_attempts,
            lockout: Duration::seconds(lockout_secs),
        }
    }

    pub fn standing(
        &self,
        locked_until: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> AccountStanding {
        match locked_until {
            Some(until) if until > now => AccountStanding::Locked { until },
            _ => AccountStanding::Clear,
        }
    }

    pub fn register_failure(&self, failed_attempts: i32, now: NaiveDateTime) -> FailureOutcome {
        let attempts = failed_attempts + 1;

        if attempts >= self.max_attempts {
            FailureOutcome::LockedOut {
                attempts,
                until: now + self.lockout,
            }
        } else {
            FailureOutcome::AttemptsRemaining {
                attempts,
                remaining: self.max_attempts - attempts,
            }
        }
    }
}

/// Minutes left on a lock, rounded up so the user is never told zero
/// while still locked.
pub fn remaining_minutes(until: NaiveDateTime, now: NaiveDateTime) -> i64 {
    ((until - now).num_seconds().max(0) as u64).div_ceil(60) as i64
}
