// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use stagehand::config::Config;
use stagehand::lifecycle::{teardown_scope, LifecycleManager, ResourceRegistry};
use stagehand::types::{GatewayConfig, GatewayConfigSpec, TenantProject};

/// Smoke orchestration run: provision the gateway configuration and one
/// managed tenant project, then tear the scope down again.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting stagehand orchestration run");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: project_namespace={}, infra_namespace={}, skip_cleanup={}",
        config.project_namespace, config.infra_namespace, config.skip_cleanup
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let manager = LifecycleManager::new(client, config.clone());
    let mut registry = ResourceRegistry::new("smoke");

    let gateway = GatewayConfig::new("default-gateway", GatewayConfigSpec::default());
    manager
        .ensure_config_ready(&mut registry, &gateway, false, &config.config_budget())
        .await?;
    info!("Gateway configuration is ready");

    let project =
        TenantProject::with_managed_space("tenant-one", &config.project_namespace, "tenant-one-space");
    manager
        .ensure_project_ready(&mut registry, &project, false, &config.project_budget())
        .await?;
    info!("Tenant project is ready");

    teardown_scope(&manager, &mut registry).await?;
    info!("Scope torn down");

    Ok(())
}
