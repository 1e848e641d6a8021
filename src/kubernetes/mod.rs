// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Cluster-facing helpers: namespace management and the gateway
//! deployment rollout gate.

pub mod deployments;
pub mod namespaces;

pub use deployments::wait_for_gateway_deployments;
pub use namespaces::{create_namespace, ensure_namespace, namespace_exists};
