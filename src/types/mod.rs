// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Resource model: the three custom resource kinds, their identity, and
//! their readiness projections.

pub mod address_space;
pub mod gateway_config;
pub mod project;

use std::fmt;

use kube::ResourceExt;
use serde::de::DeserializeOwned;

pub use address_space::{AddressSpace, AddressSpaceSpec, AddressSpaceStatus};
pub use gateway_config::{GatewayConfig, GatewayConfigSpec, GatewayConfigStatus};
pub use project::{
    AddressPlans, DependencyLink, DownstreamStrategy, ExternalStrategy, ManagedStrategy, PlanRef,
    SpaceRef, TenantProject, TenantProjectSpec, TenantProjectStatus,
};

/// The three reconciled resource kinds managed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    GatewayConfig,
    TenantProject,
    AddressSpace,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::GatewayConfig => "GatewayConfig",
            ResourceKind::TenantProject => "TenantProject",
            ResourceKind::AddressSpace => "AddressSpace",
        };
        f.write_str(s)
    }
}

/// Identity of a managed resource. Two resources are the same iff the
/// whole triple matches; the namespace is absent for cluster-scoped
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.kind, ns, self.name),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

/// Kind-specific projection of remote status into a readiness flag plus
/// a human-readable diagnostic state.
#[derive(Debug, Clone)]
pub struct ReadinessView {
    pub ready: bool,
    pub state: String,
}

/// A resource whose reconciliation is owned by an external controller.
/// The local copy is a last-synchronized snapshot; the remote copy is
/// the source of truth, so readiness is always derived from a fresh
/// fetch.
pub trait Reconciled: Clone + DeserializeOwned + std::fmt::Debug {
    const KIND: ResourceKind;

    fn readiness(&self) -> ReadinessView;
}

/// A typed resource handle held by the scope registry, keeping enough
/// of the last-synchronized state to drive dependency-ordered teardown.
#[derive(Debug, Clone)]
pub enum TrackedObject {
    Config(GatewayConfig),
    Project(TenantProject),
    Space(AddressSpace),
}

impl TrackedObject {
    pub fn kind(&self) -> ResourceKind {
        match self {
            TrackedObject::Config(_) => ResourceKind::GatewayConfig,
            TrackedObject::Project(_) => ResourceKind::TenantProject,
            TrackedObject::Space(_) => ResourceKind::AddressSpace,
        }
    }

    pub fn id(&self) -> ResourceId {
        match self {
            TrackedObject::Config(c) => ResourceId {
                kind: ResourceKind::GatewayConfig,
                namespace: None,
                name: c.name_any(),
            },
            TrackedObject::Project(p) => ResourceId {
                kind: ResourceKind::TenantProject,
                namespace: p.namespace(),
                name: p.name_any(),
            },
            TrackedObject::Space(s) => ResourceId {
                kind: ResourceKind::AddressSpace,
                namespace: s.namespace(),
                name: s.name_any(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_equality_is_the_full_triple() {
        let a = ResourceId {
            kind: ResourceKind::TenantProject,
            namespace: Some("ns-1".to_string()),
            name: "p".to_string(),
        };
        let same = a.clone();
        let other_ns = ResourceId {
            namespace: Some("ns-2".to_string()),
            ..a.clone()
        };
        let other_kind = ResourceId {
            kind: ResourceKind::AddressSpace,
            ..a.clone()
        };

        assert_eq!(a, same);
        assert_ne!(a, other_ns);
        assert_ne!(a, other_kind);
    }

    #[test]
    fn test_resource_id_display() {
        let cluster_scoped = ResourceId {
            kind: ResourceKind::GatewayConfig,
            namespace: None,
            name: "default-gateway".to_string(),
        };
        assert_eq!(cluster_scoped.to_string(), "GatewayConfig default-gateway");

        let namespaced = ResourceId {
            kind: ResourceKind::AddressSpace,
            namespace: Some("tenant-projects".to_string()),
            name: "t1-space".to_string(),
        };
        assert_eq!(
            namespaced.to_string(),
            "AddressSpace tenant-projects/t1-space"
        );
    }
}
