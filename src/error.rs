// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use thiserror::Error;

use crate::types::{ResourceId, ResourceKind};

#[derive(Error, Debug)]
pub enum StagehandError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("timed out after {timeout:?} waiting for {description}")]
    TimeoutExceeded {
        description: String,
        timeout: Duration,
    },

    #[error("{kind} '{name}' did not become ready: {state}")]
    NotReady {
        kind: ResourceKind,
        name: String,
        /// Last diagnostic state observed before the budget ran out.
        state: String,
        #[source]
        source: Box<StagehandError>,
    },

    #[error("condition '{description}' raised a fault")]
    PredicateFault {
        description: String,
        #[source]
        source: Box<StagehandError>,
    },

    #[error("namespace operation failed: {0}")]
    Namespace(String),

    #[error("teardown failed for {} resource(s)", .failures.len())]
    TeardownFailed { failures: Vec<TeardownFailure> },
}

/// A single resource that could not be torn down. The resource stays
/// registered in its scope so a later teardown pass can retry it.
#[derive(Error, Debug)]
#[error("{resource}: {source}")]
pub struct TeardownFailure {
    pub resource: ResourceId,
    #[source]
    pub source: Box<StagehandError>,
}

pub type Result<T> = std::result::Result<T, StagehandError>;
