// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end lifecycle checks against a mocked Kubernetes API:
//! idempotent ensure, readiness gating, and dependency-ordered
//! teardown.

use std::time::Duration;

use stagehand::config::Config;
use stagehand::constants::EXPECTED_GATEWAY_DEPLOYMENTS;
use stagehand::error::StagehandError;
use stagehand::lifecycle::{teardown_scope, LifecycleManager, ResourceRegistry};
use stagehand::test_utils::{
    address_space_json, deployment_json, deployment_list_json, gateway_config_json,
    namespace_json, not_found_json, server_error_json, tenant_project_json, MockService,
};
use stagehand::types::{
    GatewayConfig, GatewayConfigSpec, ResourceKind, TenantProject, TrackedObject,
};

const CONFIG_PATH: &str = "/apis/iot.stagehand.dev/v1alpha1/gatewayconfigs/default-gateway";
const CONFIG_CREATE_PATH: &str = "/apis/iot.stagehand.dev/v1alpha1/gatewayconfigs";
const NAMESPACE_PATH: &str = "/api/v1/namespaces/tenant-projects";
const PROJECT_PATH: &str =
    "/apis/iot.stagehand.dev/v1alpha1/namespaces/tenant-projects/tenantprojects/t1";
const SPACE_PATH: &str =
    "/apis/messaging.stagehand.dev/v1alpha1/namespaces/tenant-projects/addressspaces/t1-space";
const DEPLOYMENTS_PATH: &str = "/apis/apps/v1/namespaces/gateway-infra/deployments";

fn test_config() -> Config {
    Config {
        project_namespace: "tenant-projects".to_string(),
        infra_namespace: "gateway-infra".to_string(),
        skip_cleanup: false,
        poll_interval: Duration::from_millis(10),
        config_ready_timeout: Duration::from_millis(300),
        project_ready_timeout: Duration::from_millis(300),
        delete_timeout: Duration::from_millis(300),
    }
}

fn manager_for(mock: &MockService) -> LifecycleManager {
    LifecycleManager::new(mock.clone().into_client(), test_config())
}

fn full_deployment_list() -> String {
    let items: Vec<serde_json::Value> = EXPECTED_GATEWAY_DEPLOYMENTS
        .iter()
        .map(|name| deployment_json(name, "gateway-infra", 1, 1))
        .collect();
    deployment_list_json(&items)
}

fn gateway() -> GatewayConfig {
    GatewayConfig::new("default-gateway", GatewayConfigSpec::default())
}

fn project() -> TenantProject {
    TenantProject::with_managed_space("t1", "tenant-projects", "t1-space")
}

#[tokio::test]
async fn test_ensure_config_ready_skips_create_for_existing_identity() {
    let mock = MockService::new()
        .on_get(
            CONFIG_PATH,
            200,
            &gateway_config_json("default-gateway", true, "Active"),
        )
        .on_get(DEPLOYMENTS_PATH, 200, &full_deployment_list());
    let manager = manager_for(&mock);
    let mut registry = ResourceRegistry::new("test");

    let synced = manager
        .ensure_config_ready(&mut registry, &gateway(), false, &test_config().config_budget())
        .await
        .unwrap();

    assert!(synced.status.unwrap().initialized);
    // Existing identity: zero create requests were issued.
    assert!(mock.requests_with_method("POST").is_empty());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_ensure_config_ready_creates_when_absent() {
    let ready = gateway_config_json("default-gateway", true, "Active");
    let mock = MockService::new()
        .on_get_seq(
            CONFIG_PATH,
            &[
                (404, not_found_json("gatewayconfigs", "default-gateway").as_str()),
                (200, ready.as_str()),
            ],
        )
        .on_post(CONFIG_CREATE_PATH, 201, &ready)
        .on_get(DEPLOYMENTS_PATH, 200, &full_deployment_list());
    let manager = manager_for(&mock);
    let mut registry = ResourceRegistry::new("test");

    manager
        .ensure_config_ready(&mut registry, &gateway(), false, &test_config().config_budget())
        .await
        .unwrap();

    assert_eq!(
        mock.requests_with_method("POST"),
        vec![CONFIG_CREATE_PATH.to_string()]
    );
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_ensure_config_ready_fails_while_deployments_are_missing() {
    // Five of six deployments present: the gate must not pass even
    // though the configuration itself reports initialized.
    let items: Vec<serde_json::Value> = EXPECTED_GATEWAY_DEPLOYMENTS
        .iter()
        .take(5)
        .map(|name| deployment_json(name, "gateway-infra", 1, 1))
        .collect();
    let mock = MockService::new()
        .on_get(
            CONFIG_PATH,
            200,
            &gateway_config_json("default-gateway", true, "Active"),
        )
        .on_get(DEPLOYMENTS_PATH, 200, &deployment_list_json(&items));
    let manager = manager_for(&mock);
    let mut registry = ResourceRegistry::new("test");

    let err = manager
        .ensure_config_ready(&mut registry, &gateway(), false, &test_config().config_budget())
        .await
        .unwrap_err();

    assert!(matches!(err, StagehandError::TimeoutExceeded { .. }));
    // Nothing registered for a resource that never converged.
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_ensure_project_ready_waits_for_linked_space() {
    let mock = MockService::new()
        .on_get(NAMESPACE_PATH, 200, &namespace_json("tenant-projects"))
        .on_get(
            PROJECT_PATH,
            200,
            &tenant_project_json("t1", "tenant-projects", Some("t1-space"), true),
        )
        .on_get(
            SPACE_PATH,
            200,
            &address_space_json("t1-space", "tenant-projects", true),
        );
    let manager = manager_for(&mock);
    let mut registry = ResourceRegistry::new("test");

    let synced = manager
        .ensure_project_ready(&mut registry, &project(), false, &test_config().project_budget())
        .await
        .unwrap();

    assert!(synced.managed_space_link().is_some());
    assert!(mock.requests_with_method("POST").is_empty());
    // The linked space was actually consulted.
    assert!(mock
        .requests_with_method("GET")
        .iter()
        .any(|p| p == SPACE_PATH));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_project_that_never_readies_reports_last_diagnostic() {
    let mock = MockService::new()
        .on_get(NAMESPACE_PATH, 200, &namespace_json("tenant-projects"))
        .on_get(
            PROJECT_PATH,
            200,
            &tenant_project_json("t1", "tenant-projects", Some("t1-space"), false),
        );
    let manager = manager_for(&mock);
    let mut registry = ResourceRegistry::new("test");

    let err = manager
        .ensure_project_ready(&mut registry, &project(), false, &test_config().project_budget())
        .await
        .unwrap_err();

    match err {
        StagehandError::NotReady { kind, state, .. } => {
            assert_eq!(kind, ResourceKind::TenantProject);
            assert!(state.contains("Configuring"), "state was: {state}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_teardown_deletes_space_then_project_then_config() {
    let space = address_space_json("t1-space", "tenant-projects", true);
    let proj = tenant_project_json("t1", "tenant-projects", Some("t1-space"), true);
    let conf = gateway_config_json("default-gateway", true, "Active");
    let mock = MockService::new()
        .on_get_seq(
            SPACE_PATH,
            &[(200, space.as_str()), (404, not_found_json("addressspaces", "t1-space").as_str())],
        )
        .on_delete(SPACE_PATH, 200, &space)
        .on_get_seq(
            PROJECT_PATH,
            &[(200, proj.as_str()), (404, not_found_json("tenantprojects", "t1").as_str())],
        )
        .on_delete(PROJECT_PATH, 200, &proj)
        .on_get_seq(
            CONFIG_PATH,
            &[
                (200, conf.as_str()),
                (404, not_found_json("gatewayconfigs", "default-gateway").as_str()),
            ],
        )
        .on_delete(CONFIG_PATH, 200, &conf);
    let manager = manager_for(&mock);

    let mut registry = ResourceRegistry::new("test");
    registry.register(
        TrackedObject::Project(TenantProject::with_managed_space(
            "t1",
            "tenant-projects",
            "t1-space",
        )),
        false,
    );
    registry.register(TrackedObject::Config(gateway()), false);

    teardown_scope(&manager, &mut registry).await.unwrap();

    assert_eq!(
        mock.requests_with_method("DELETE"),
        vec![
            SPACE_PATH.to_string(),
            PROJECT_PATH.to_string(),
            CONFIG_PATH.to_string(),
        ]
    );
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_teardown_treats_vanished_linked_space_as_satisfied() {
    let proj = tenant_project_json("t1", "tenant-projects", Some("t1-space"), true);
    let mock = MockService::new()
        .on_get(SPACE_PATH, 404, &not_found_json("addressspaces", "t1-space"))
        .on_get_seq(
            PROJECT_PATH,
            &[(200, proj.as_str()), (404, not_found_json("tenantprojects", "t1").as_str())],
        )
        .on_delete(PROJECT_PATH, 200, &proj);
    let manager = manager_for(&mock);

    let mut registry = ResourceRegistry::new("test");
    registry.register(
        TrackedObject::Project(TenantProject::with_managed_space(
            "t1",
            "tenant-projects",
            "t1-space",
        )),
        false,
    );

    teardown_scope(&manager, &mut registry).await.unwrap();

    assert_eq!(
        mock.requests_with_method("DELETE"),
        vec![PROJECT_PATH.to_string()]
    );
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_teardown_never_deletes_shared_resources() {
    let mock = MockService::new();
    let manager = manager_for(&mock);

    let mut registry = ResourceRegistry::new("test");
    registry.register(TrackedObject::Config(gateway()), true);

    teardown_scope(&manager, &mut registry).await.unwrap();

    assert!(mock.requests().is_empty());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_teardown_skip_cleanup_suppresses_all_deletions() {
    let mock = MockService::new();
    let mut config = test_config();
    config.skip_cleanup = true;
    let manager = LifecycleManager::new(mock.clone().into_client(), config);

    let mut registry = ResourceRegistry::new("test");
    registry.register(TrackedObject::Config(gateway()), false);

    teardown_scope(&manager, &mut registry).await.unwrap();

    assert!(mock.requests().is_empty());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_teardown_continues_past_failures_and_reports_them_all() {
    let space = address_space_json("t1-space", "tenant-projects", true);
    let conf = gateway_config_json("default-gateway", true, "Active");
    let mock = MockService::new()
        .on_get(SPACE_PATH, 200, &space)
        .on_delete(SPACE_PATH, 500, &server_error_json("etcd is unhappy"))
        .on_get_seq(
            CONFIG_PATH,
            &[
                (200, conf.as_str()),
                (404, not_found_json("gatewayconfigs", "default-gateway").as_str()),
            ],
        )
        .on_delete(CONFIG_PATH, 200, &conf);
    let manager = manager_for(&mock);

    let mut registry = ResourceRegistry::new("test");
    let tracked_project = TrackedObject::Project(TenantProject::with_managed_space(
        "t1",
        "tenant-projects",
        "t1-space",
    ));
    let project_id = tracked_project.id();
    registry.register(tracked_project, false);
    registry.register(TrackedObject::Config(gateway()), false);

    let err = teardown_scope(&manager, &mut registry).await.unwrap_err();

    match err {
        StagehandError::TeardownFailed { failures } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].resource.kind, ResourceKind::TenantProject);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The failed project stays registered for a retry pass, but the
    // config behind it was still attempted and cleaned up.
    assert!(registry.contains(&project_id));
    assert_eq!(registry.len(), 1);
    assert!(mock
        .requests_with_method("DELETE")
        .iter()
        .any(|p| p == CONFIG_PATH));
}
