// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Deadline tracking for bounded readiness polling.

use std::time::Duration;

use tokio::time::Instant;

use crate::constants::defaults;

/// A bounded time window within which a condition must become true.
///
/// The budget starts counting at construction and is immutable apart
/// from the passage of time; `remaining()` never increases. Built on
/// `tokio::time::Instant` so tests can drive it with a paused clock.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutBudget {
    deadline: Instant,
    timeout: Duration,
    poll_interval: Duration,
}

impl TimeoutBudget {
    /// Budget of `timeout` with the default poll interval.
    pub fn new(timeout: Duration) -> Self {
        Self::with_poll_interval(
            timeout,
            Duration::from_secs(defaults::POLL_INTERVAL_SECS),
        )
    }

    pub fn with_poll_interval(timeout: Duration, poll_interval: Duration) -> Self {
        TimeoutBudget {
            deadline: Instant::now() + timeout,
            timeout,
            poll_interval,
        }
    }

    /// Time left before the deadline, saturating at zero once expired.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn expired(&self) -> bool {
        self.remaining() == Duration::ZERO
    }

    /// The originally configured window, for diagnostics.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
