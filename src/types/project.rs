// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use kube::api::ObjectMeta;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::constants::plans;
use crate::types::{ReadinessView, Reconciled, ResourceKind};

/// A namespaced resource describing one tenant's provisioning request,
/// optionally linked to a downstream messaging space.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "iot.stagehand.dev", version = "v1alpha1", kind = "TenantProject")]
#[kube(namespaced)]
#[kube(status = "TenantProjectStatus")]
#[serde(rename_all = "camelCase")]
pub struct TenantProjectSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_strategy: Option<DownstreamStrategy>,
}

/// Either a managed space this project provisions, or an externally
/// operated endpoint. Plain structs instead of nested builders; the
/// optional chain is resolved once via [`TenantProject::managed_space_link`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed: Option<ManagedStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalStrategy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagedStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_space: Option<SpaceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<AddressPlans>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

/// Plans for the per-project addresses provisioned inside the managed
/// space.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPlans {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<PlanRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<PlanRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<PlanRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStrategy {
    pub host: String,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantProjectStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reference from a project to the downstream messaging space it
/// provisions. Absent when the project uses an externally-managed
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLink {
    pub space_name: String,
}

impl TenantProject {
    /// Basic project provisioning a managed space with the standard
    /// plans for its telemetry, event and command addresses.
    pub fn with_managed_space(name: &str, namespace: &str, space_name: &str) -> Self {
        let spec = TenantProjectSpec {
            downstream_strategy: Some(DownstreamStrategy {
                managed: Some(ManagedStrategy {
                    address_space: Some(SpaceRef {
                        name: Some(space_name.to_string()),
                        plan: Some(plans::STANDARD_UNLIMITED.to_string()),
                    }),
                    addresses: Some(AddressPlans {
                        telemetry: Some(PlanRef {
                            plan: Some(plans::STANDARD_SMALL_ANYCAST.to_string()),
                        }),
                        event: Some(PlanRef {
                            plan: Some(plans::STANDARD_SMALL_QUEUE.to_string()),
                        }),
                        command: Some(PlanRef {
                            plan: Some(plans::STANDARD_SMALL_ANYCAST.to_string()),
                        }),
                    }),
                }),
                external: None,
            }),
        };

        TenantProject {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec,
            status: None,
        }
    }

    /// Resolve the managed-space reference, if the whole optional chain
    /// is present.
    pub fn managed_space_link(&self) -> Option<DependencyLink> {
        let name = self
            .spec
            .downstream_strategy
            .as_ref()?
            .managed
            .as_ref()?
            .address_space
            .as_ref()?
            .name
            .clone()?;
        Some(DependencyLink { space_name: name })
    }
}

impl Reconciled for TenantProject {
    const KIND: ResourceKind = ResourceKind::TenantProject;

    fn readiness(&self) -> ReadinessView {
        match &self.status {
            Some(status) => ReadinessView {
                ready: status.ready,
                state: format!(
                    "phase: {}, message: {}",
                    status.phase.as_deref().unwrap_or("unknown"),
                    status.message.as_deref().unwrap_or("-"),
                ),
            },
            None => ReadinessView {
                ready: false,
                state: "no status reported".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_project_resolves_dependency_link() {
        let project = TenantProject::with_managed_space("t1", "tenant-projects", "t1-space");

        assert_eq!(
            project.managed_space_link(),
            Some(DependencyLink {
                space_name: "t1-space".to_string()
            })
        );
    }

    #[test]
    fn test_link_absent_without_downstream_strategy() {
        let project = TenantProject::new("t1", TenantProjectSpec::default());
        assert_eq!(project.managed_space_link(), None);
    }

    #[test]
    fn test_link_absent_for_external_strategy() {
        let project = TenantProject::new(
            "t1",
            TenantProjectSpec {
                downstream_strategy: Some(DownstreamStrategy {
                    managed: None,
                    external: Some(ExternalStrategy {
                        host: "messaging.example.com".to_string(),
                        port: 5671,
                    }),
                }),
            },
        );
        assert_eq!(project.managed_space_link(), None);
    }

    #[test]
    fn test_link_absent_when_space_ref_has_no_name() {
        let project = TenantProject::new(
            "t1",
            TenantProjectSpec {
                downstream_strategy: Some(DownstreamStrategy {
                    managed: Some(ManagedStrategy {
                        address_space: Some(SpaceRef {
                            name: None,
                            plan: Some(plans::STANDARD_UNLIMITED.to_string()),
                        }),
                        addresses: None,
                    }),
                    external: None,
                }),
            },
        );
        assert_eq!(project.managed_space_link(), None);
    }

    #[test]
    fn test_basic_project_carries_standard_plans() {
        let project = TenantProject::with_managed_space("t1", "tenant-projects", "t1-space");
        let managed = project
            .spec
            .downstream_strategy
            .as_ref()
            .unwrap()
            .managed
            .as_ref()
            .unwrap();

        let space = managed.address_space.as_ref().unwrap();
        assert_eq!(space.plan.as_deref(), Some(plans::STANDARD_UNLIMITED));

        let addresses = managed.addresses.as_ref().unwrap();
        assert_eq!(
            addresses.telemetry.as_ref().unwrap().plan.as_deref(),
            Some(plans::STANDARD_SMALL_ANYCAST)
        );
        assert_eq!(
            addresses.event.as_ref().unwrap().plan.as_deref(),
            Some(plans::STANDARD_SMALL_QUEUE)
        );
        assert_eq!(
            addresses.command.as_ref().unwrap().plan.as_deref(),
            Some(plans::STANDARD_SMALL_ANYCAST)
        );
    }

    #[test]
    fn test_ready_status_projection() {
        let mut project = TenantProject::with_managed_space("t1", "tenant-projects", "t1-space");
        project.status = Some(TenantProjectStatus {
            ready: true,
            phase: Some("Active".to_string()),
            message: None,
        });

        let view = project.readiness();
        assert!(view.ready);
        assert_eq!(view.state, "phase: Active, message: -");
    }

    #[test]
    fn test_missing_status_is_not_ready() {
        let project = TenantProject::with_managed_space("t1", "tenant-projects", "t1-space");
        let view = project.readiness();
        assert!(!view.ready);
        assert_eq!(view.state, "no status reported");
    }
}
