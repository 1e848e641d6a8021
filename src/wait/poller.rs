// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Generic bounded-retry loop over an asynchronous boolean predicate.

use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{Result, StagehandError};
use crate::wait::TimeoutBudget;

/// Passed into a polled predicate so it can tell a routine poll from the
/// terminal attempt and emit last-chance diagnostics. Never affects the
/// pass/fail outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    Normal,
    LastTry,
}

/// Poll `condition` until it returns `true` or `budget` runs out.
///
/// The condition is evaluated once before any sleep, so an
/// already-satisfied condition returns without suspending. Polling only
/// retries on `false`; a predicate fault is surfaced immediately without
/// another attempt. Once less than one poll interval remains, the
/// condition is invoked a single final time with [`WaitPhase::LastTry`],
/// and exhaustion yields [`StagehandError::TimeoutExceeded`].
pub async fn wait_until_condition<F, Fut>(
    description: &str,
    mut condition: F,
    budget: &TimeoutBudget,
) -> Result<()>
where
    F: FnMut(WaitPhase) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    loop {
        let phase = if budget.remaining() <= budget.poll_interval() {
            WaitPhase::LastTry
        } else {
            WaitPhase::Normal
        };

        let satisfied = condition(phase).await.map_err(|e| match e {
            e @ StagehandError::PredicateFault { .. } => e,
            other => StagehandError::PredicateFault {
                description: description.to_string(),
                source: Box::new(other),
            },
        })?;

        if satisfied {
            debug!("Condition '{}' satisfied", description);
            return Ok(());
        }

        if phase == WaitPhase::LastTry {
            return Err(StagehandError::TimeoutExceeded {
                description: description.to_string(),
                timeout: budget.timeout(),
            });
        }

        info!(
            "Waiting for {} ({:?} left)",
            description,
            budget.remaining()
        );
        sleep(budget.poll_interval()).await;
    }
}
