// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::types::{ReadinessView, Reconciled, ResourceKind};

/// The single cluster-scoped resource describing shared gateway
/// infrastructure. Reconciled externally; this crate only observes
/// `status`.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "iot.stagehand.dev", version = "v1alpha1", kind = "GatewayConfig")]
#[kube(status = "GatewayConfigStatus")]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfigSpec {
    /// Protocol adapters to enable, e.g. "http" and "mqtt".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_adapters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_registry_storage: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfigStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Reconciled for GatewayConfig {
    const KIND: ResourceKind = ResourceKind::GatewayConfig;

    fn readiness(&self) -> ReadinessView {
        match &self.status {
            Some(status) => ReadinessView {
                ready: status.initialized,
                state: status
                    .state
                    .clone()
                    .unwrap_or_else(|| "no state reported".to_string()),
            },
            None => ReadinessView {
                ready: false,
                state: "no status reported".to_string(),
            },
        }
    }
}
