// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Dependency-ordered teardown of a scope's owned resources.
//!
//! The relationship depth is fixed at three levels with no cycles, so
//! resolution is a static rank (space, then project, then config)
//! rather than a general graph sort. A project's linked managed space
//! is deleted and confirmed gone before the project itself; gateway
//! configurations go last, after every project that might reference
//! them.

use kube::{Api, Resource, ResourceExt};
use tracing::{error, info, warn};

use crate::error::{Result, StagehandError, TeardownFailure};
use crate::lifecycle::{LifecycleManager, ResourceRegistry};
use crate::types::{Reconciled, ResourceId, ResourceKind, TrackedObject};

fn deletion_rank(kind: ResourceKind) -> u8 {
    match kind {
        ResourceKind::AddressSpace => 0,
        ResourceKind::TenantProject => 1,
        ResourceKind::GatewayConfig => 2,
    }
}

/// Owned resources of the scope in deletion order. Shared entries are
/// excluded; ordering within a kind follows registration order.
pub fn teardown_plan(registry: &ResourceRegistry) -> Vec<TrackedObject> {
    let mut plan: Vec<TrackedObject> = registry.owned().cloned().collect();
    plan.sort_by_key(|object| deletion_rank(object.kind()));
    plan
}

/// Tear down every resource the scope owns, in dependency order.
///
/// Each resource yields its own result; failures are logged, collected
/// and reported together in [`StagehandError::TeardownFailed`] while the
/// remaining resources are still attempted. A failed resource stays
/// registered so a later pass can retry it.
pub async fn teardown_scope(
    manager: &LifecycleManager,
    registry: &mut ResourceRegistry,
) -> Result<()> {
    if manager.config().skip_cleanup {
        warn!("Cleanup for scope '{}' - SKIPPED", registry.scope());
        return Ok(());
    }

    info!("Tearing down scope '{}'", registry.scope());

    let mut failures = Vec::new();
    for object in teardown_plan(registry) {
        let id = object.id();
        match teardown_object(manager, registry, &object).await {
            Ok(()) => registry.unregister(&id),
            Err(e) => {
                error!("Failed to tear down {}: {}", id, e);
                failures.push(TeardownFailure {
                    resource: id,
                    source: Box::new(e),
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(StagehandError::TeardownFailed { failures })
    }
}

async fn teardown_object(
    manager: &LifecycleManager,
    registry: &ResourceRegistry,
    object: &TrackedObject,
) -> Result<()> {
    match object {
        TrackedObject::Space(space) => {
            let namespace = space.namespace().unwrap_or_default();
            delete_and_confirm(manager, &manager.spaces(&namespace), &space.name_any()).await
        }
        TrackedObject::Project(project) => {
            let namespace = project
                .namespace()
                .unwrap_or_else(|| manager.config().project_namespace.clone());

            if let Some(link) = project.managed_space_link() {
                let space_id = ResourceId {
                    kind: ResourceKind::AddressSpace,
                    namespace: Some(namespace.clone()),
                    name: link.space_name.clone(),
                };
                if registry.is_shared(&space_id) {
                    info!("Linked space {} is shared, leaving it in place", space_id);
                } else {
                    delete_and_confirm(manager, &manager.spaces(&namespace), &link.space_name)
                        .await?;
                }
            }

            delete_and_confirm(manager, &manager.projects(&namespace), &project.name_any()).await
        }
        TrackedObject::Config(config) => {
            delete_and_confirm(manager, &manager.configs(), &config.name_any()).await
        }
    }
}

/// Delete one resource and wait until its deletion is observed. A
/// resource that no longer exists (e.g. removed by another actor) is
/// treated as already satisfied.
async fn delete_and_confirm<K>(manager: &LifecycleManager, api: &Api<K>, name: &str) -> Result<()>
where
    K: Reconciled + Resource<DynamicType = ()>,
{
    if api.get_opt(name).await?.is_none() {
        info!("{} '{}' no longer exists", K::KIND, name);
        return Ok(());
    }

    manager.delete(api, name).await?;
    let budget = manager.config().delete_budget();
    manager.wait_absent(api, name, &budget).await
}
