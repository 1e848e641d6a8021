// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use std::env;
use std::time::Duration;

use anyhow::Result;

use crate::constants::defaults;
use crate::wait::TimeoutBudget;

/// Orchestration configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace where tenant projects are created by default.
    pub project_namespace: String,
    /// Namespace hosting the gateway infrastructure deployments.
    pub infra_namespace: String,
    /// When set, teardown is suppressed entirely so a run can be
    /// inspected post-mortem.
    pub skip_cleanup: bool,
    /// Fixed interval between readiness polls.
    pub poll_interval: Duration,
    pub config_ready_timeout: Duration,
    pub project_ready_timeout: Duration,
    pub delete_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// the built-in defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            project_namespace: env::var("PROJECT_NAMESPACE")
                .unwrap_or_else(|_| "tenant-projects".to_string()),
            infra_namespace: env::var("INFRA_NAMESPACE")
                .unwrap_or_else(|_| "gateway-infra".to_string()),
            skip_cleanup: env_flag("SKIP_CLEANUP"),
            poll_interval: env_secs("POLL_INTERVAL_SECS", defaults::POLL_INTERVAL_SECS),
            config_ready_timeout: env_secs(
                "CONFIG_READY_TIMEOUT_SECS",
                defaults::CONFIG_READY_TIMEOUT_SECS,
            ),
            project_ready_timeout: env_secs(
                "PROJECT_READY_TIMEOUT_SECS",
                defaults::PROJECT_READY_TIMEOUT_SECS,
            ),
            delete_timeout: env_secs("DELETE_TIMEOUT_SECS", defaults::DELETE_TIMEOUT_SECS),
        })
    }

    /// Fresh budget for gateway configuration readiness.
    pub fn config_budget(&self) -> TimeoutBudget {
        TimeoutBudget::with_poll_interval(self.config_ready_timeout, self.poll_interval)
    }

    /// Fresh budget for tenant project readiness.
    pub fn project_budget(&self) -> TimeoutBudget {
        TimeoutBudget::with_poll_interval(self.project_ready_timeout, self.poll_interval)
    }

    /// Fresh budget for observing one resource deletion.
    pub fn delete_budget(&self) -> TimeoutBudget {
        TimeoutBudget::with_poll_interval(self.delete_timeout, self.poll_interval)
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn env_secs(key: &str, default: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}
