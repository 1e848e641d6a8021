// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Per-scope bookkeeping of resources created but not yet destroyed.

use tracing::debug;

use crate::types::{ResourceId, TrackedObject};

#[derive(Debug, Clone)]
struct RegistryEntry {
    object: TrackedObject,
    shared: bool,
}

/// Tracks the resources owned by one orchestration scope. Resources
/// marked shared are recorded but never torn down by the scope; an
/// entry is removed only once its deletion has been observed remotely.
///
/// One instance per scope; scopes share no mutable state.
#[derive(Debug)]
pub struct ResourceRegistry {
    scope: String,
    entries: Vec<RegistryEntry>,
}

impl ResourceRegistry {
    pub fn new(scope: impl Into<String>) -> Self {
        ResourceRegistry {
            scope: scope.into(),
            entries: Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Record a resource for this scope. A resource is registered at
    /// most once per scope; re-registration is a no-op.
    pub fn register(&mut self, object: TrackedObject, shared: bool) {
        let id = object.id();
        if self.entries.iter().any(|e| e.object.id() == id) {
            debug!("{} already registered in scope '{}'", id, self.scope);
            return;
        }
        debug!(
            "Registering {} in scope '{}' (shared: {})",
            id, self.scope, shared
        );
        self.entries.push(RegistryEntry { object, shared });
    }

    /// Resources this scope owns and must tear down. Shared entries are
    /// excluded.
    pub fn owned(&self) -> impl Iterator<Item = &TrackedObject> {
        self.entries
            .iter()
            .filter(|e| !e.shared)
            .map(|e| &e.object)
    }

    pub fn unregister(&mut self, id: &ResourceId) {
        self.entries.retain(|e| e.object.id() != *id);
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.entries.iter().any(|e| e.object.id() == *id)
    }

    pub fn is_shared(&self, id: &ResourceId) -> bool {
        self.entries
            .iter()
            .any(|e| e.shared && e.object.id() == *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
