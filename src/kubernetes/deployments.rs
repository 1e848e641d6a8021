// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Auxiliary readiness gate for the gateway configuration: all expected
//! infrastructure deployments present and fully rolled out.

use k8s_openapi::api::apps::v1::Deployment;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{instrument, warn};

use crate::constants::{EXPECTED_GATEWAY_DEPLOYMENTS, GATEWAY_COMPONENT_SELECTOR};
use crate::error::Result;
use crate::wait::{wait_until_condition, TimeoutBudget, WaitPhase};

/// True when exactly the expected deployment names are present.
/// A single missing deployment makes the whole gate fail, no matter
/// what the configuration status itself claims.
pub fn all_deployments_present(deployments: &[Deployment]) -> bool {
    let mut names: Vec<String> = deployments.iter().map(|d| d.name_any()).collect();
    names.sort();
    names == EXPECTED_GATEWAY_DEPLOYMENTS
}

/// True when a deployment has reached its expected replica count.
pub fn replicas_ready(deployment: &Deployment) -> bool {
    let expected = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(1);
    let ready = deployment
        .status
        .as_ref()
        .and_then(|s| s.ready_replicas)
        .unwrap_or(0);
    ready >= expected
}

/// Combined gate: all expected deployments present, each at its
/// expected replica count.
pub fn deployments_complete(deployments: &[Deployment]) -> bool {
    all_deployments_present(deployments) && deployments.iter().all(replicas_ready)
}

/// Poll until the gateway infrastructure deployments in `namespace`
/// have all rolled out, re-listing on every attempt.
#[instrument(skip(client, budget))]
pub async fn wait_for_gateway_deployments(
    client: &Client,
    namespace: &str,
    budget: &TimeoutBudget,
) -> Result<()> {
    let api: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let params = ListParams::default().labels(GATEWAY_COMPONENT_SELECTOR);

    wait_until_condition(
        "gateway deployments to roll out",
        move |phase| {
            let api = api.clone();
            let params = params.clone();
            async move {
                let deployments = api.list(&params).await?.items;
                let complete = deployments_complete(&deployments);
                if !complete && phase == WaitPhase::LastTry {
                    let names: Vec<String> =
                        deployments.iter().map(|d| d.name_any()).collect();
                    warn!(
                        "Gateway deployments still incomplete, observed: {:?}",
                        names
                    );
                }
                Ok(complete)
            }
        },
        budget,
    )
    .await
}
