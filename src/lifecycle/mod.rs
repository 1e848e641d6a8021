// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Create-if-absent / wait-ready lifecycle management, per-scope
//! resource bookkeeping, and dependency-ordered teardown.

pub mod manager;
pub mod registry;
pub mod teardown;

pub use manager::LifecycleManager;
pub use registry::ResourceRegistry;
pub use teardown::teardown_scope;
