// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded-readiness orchestration for a small graph of externally
//! reconciled cluster resources: a cluster-scoped gateway
//! configuration, per-tenant projects, and the downstream messaging
//! spaces projects may provision.

pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod lifecycle;
pub mod test_utils;
pub mod types;
pub mod wait;
