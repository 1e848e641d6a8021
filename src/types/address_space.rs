// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::types::{ReadinessView, Reconciled, ResourceKind};

/// A separately-reconciled messaging resource a project may provision
/// and depend on.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "messaging.stagehand.dev",
    version = "v1alpha1",
    kind = "AddressSpace"
)]
#[kube(namespaced)]
#[kube(status = "AddressSpaceStatus")]
#[serde(rename_all = "camelCase")]
pub struct AddressSpaceSpec {
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub space_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpaceStatus {
    #[serde(default)]
    pub is_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl Reconciled for AddressSpace {
    const KIND: ResourceKind = ResourceKind::AddressSpace;

    fn readiness(&self) -> ReadinessView {
        match &self.status {
            Some(status) => {
                let state = match &status.messages {
                    Some(messages) if !messages.is_empty() => messages.join("; "),
                    _ => status
                        .phase
                        .clone()
                        .unwrap_or_else(|| "no phase reported".to_string()),
                };
                ReadinessView {
                    ready: status.is_ready,
                    state,
                }
            }
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

    fn make_space(status: Option<AddressSpaceStatus>) -> AddressSpace {
        let mut space = AddressSpace::new(
            "t1-space",
            AddressSpaceSpec {
                space_type: Some("standard".to_string()),
                plan: Some("standard-unlimited".to_string()),
            },
        );
        space.status = status;
        space
    }

    #[test]
    fn test_ready_space() {
        let view = make_space(Some(AddressSpaceStatus {
            is_ready: true,
            phase: Some("Active".to_string()),
            messages: None,
        }))
        .readiness();

        assert!(view.ready);
        assert_eq!(view.state, "Active");
    }

    #[test]
    fn test_pending_space_reports_messages() {
        let view = make_space(Some(AddressSpaceStatus {
            is_ready: false,
            phase: Some("Configuring".to_string()),
            messages: Some(vec![
                "router not ready".to_string(),
                "broker pending".to_string(),
            ]),
        }))
        .readiness();

        assert!(!view.ready);
        assert_eq!(view.state, "router not ready; broker pending");
    }

    #[test]
    fn test_missing_status_is_not_ready() {
        let view = make_space(None).readiness();
        assert!(!view.ready);
        assert_eq!(view.state, "no status reported");
    }
}
