// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded waiting: the timeout budget and the generic condition poller.

pub mod budget;
pub mod poller;

pub use budget::TimeoutBudget;
pub use poller::{wait_until_condition, WaitPhase};
