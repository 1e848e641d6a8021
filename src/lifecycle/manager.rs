// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Create-if-absent, wait-until-ready and status synchronization for
//! the managed resource kinds.

use std::sync::{Arc, Mutex};

use kube::api::{DeleteParams, PostParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{Result, StagehandError};
use crate::kubernetes::{ensure_namespace, wait_for_gateway_deployments};
use crate::lifecycle::ResourceRegistry;
use crate::types::{AddressSpace, GatewayConfig, Reconciled, TenantProject, TrackedObject};
use crate::wait::{wait_until_condition, TimeoutBudget, WaitPhase};

/// Drives creation and readiness observation for one orchestration
/// scope. The cluster store is shared and externally synchronized, so
/// every poll re-reads remote state instead of trusting a local cache.
pub struct LifecycleManager {
    client: Client,
    config: Config,
}

impl LifecycleManager {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn configs(&self) -> Api<GatewayConfig> {
        Api::all(self.client.clone())
    }

    pub fn projects(&self, namespace: &str) -> Api<TenantProject> {
        Api::namespaced(self.client.clone(), namespace)
    }

    pub fn spaces(&self, namespace: &str) -> Api<AddressSpace> {
        Api::namespaced(self.client.clone(), namespace)
    }

    /// Ensure the gateway configuration exists and has fully converged:
    /// `status.initialized` plus all expected infrastructure deployments
    /// rolled out, both within the same budget. Returns a synchronized
    /// local copy and registers it with the scope unless shared.
    #[instrument(skip_all, fields(name = %desired.name_any()))]
    pub async fn ensure_config_ready(
        &self,
        registry: &mut ResourceRegistry,
        desired: &GatewayConfig,
        shared: bool,
        budget: &TimeoutBudget,
    ) -> Result<GatewayConfig> {
        let api = self.configs();
        let name = desired.name_any();

        self.ensure_exists(&api, desired).await?;
        self.wait_ready(&api, &name, budget).await?;
        wait_for_gateway_deployments(&self.client, &self.config.infra_namespace, budget).await?;

        let synced = api.get(&name).await?;
        registry.register(TrackedObject::Config(synced.clone()), shared);
        Ok(synced)
    }

    /// Ensure a tenant project exists and is ready, including the
    /// readiness of its linked managed space if it provisions one.
    /// The project namespace is created first when missing.
    #[instrument(skip_all, fields(name = %desired.name_any()))]
    pub async fn ensure_project_ready(
        &self,
        registry: &mut ResourceRegistry,
        desired: &TenantProject,
        shared: bool,
        budget: &TimeoutBudget,
    ) -> Result<TenantProject> {
        let namespace = desired
            .namespace()
            .unwrap_or_else(|| self.config.project_namespace.clone());
        ensure_namespace(&self.client, &namespace).await?;

        let api = self.projects(&namespace);
        let name = desired.name_any();

        self.ensure_exists(&api, desired).await?;
        let project = self.wait_ready(&api, &name, budget).await?;

        if let Some(link) = project.managed_space_link() {
            self.wait_space_ready(&namespace, &link.space_name, budget)
                .await?;
        }

        let synced = api.get(&name).await?;
        registry.register(TrackedObject::Project(synced.clone()), shared);
        Ok(synced)
    }

    /// Wait for an address space to exist and report ready.
    pub async fn wait_space_ready(
        &self,
        namespace: &str,
        name: &str,
        budget: &TimeoutBudget,
    ) -> Result<AddressSpace> {
        let api = self.spaces(namespace);
        self.wait_ready(&api, name, budget).await
    }

    /// Issue a deletion without waiting for it to be observed; callers
    /// needing confirmation compose with [`LifecycleManager::wait_absent`].
    /// A resource that is already gone is not an error.
    pub async fn delete<K>(&self, api: &Api<K>, name: &str) -> Result<()>
    where
        K: Reconciled + Resource<DynamicType = ()>,
    {
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => {
                info!("Deletion of {} '{}' requested", K::KIND, name);
                Ok(())
            }
            Err(kube::Error::Api(err)) if err.code == 404 => {
                info!("{} '{}' already gone", K::KIND, name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Poll until the resource can no longer be observed remotely.
    pub async fn wait_absent<K>(
        &self,
        api: &Api<K>,
        name: &str,
        budget: &TimeoutBudget,
    ) -> Result<()>
    where
        K: Reconciled + Resource<DynamicType = ()>,
    {
        let description = format!("{} '{}' to be deleted", K::KIND, name);
        let api = api.clone();
        let name = name.to_string();

        wait_until_condition(
            &description,
            move |_| {
                let api = api.clone();
                let name = name.clone();
                async move { Ok(api.get_opt(&name).await?.is_none()) }
            },
            budget,
        )
        .await
    }

    /// Create the resource if no remote copy exists. A second call with
    /// an existing identity logs and skips creation rather than erroring.
    async fn ensure_exists<K>(&self, api: &Api<K>, desired: &K) -> Result<()>
    where
        K: Reconciled + Resource<DynamicType = ()> + Serialize,
    {
        let name = desired.name_any();
        if api.get_opt(&name).await?.is_some() {
            info!("{} '{}' already exists, skipping create", K::KIND, name);
            return Ok(());
        }

        info!("Creating {} '{}'", K::KIND, name);
        api.create(&PostParams::default(), desired).await?;
        Ok(())
    }

    /// Poll the remote copy until its readiness projection reports
    /// converged, re-fetching on every attempt. On success a fresh
    /// remote read is returned; on budget exhaustion the timeout is
    /// wrapped in `NotReady` together with the last observed state.
    async fn wait_ready<K>(&self, api: &Api<K>, name: &str, budget: &TimeoutBudget) -> Result<K>
    where
        K: Reconciled + Resource<DynamicType = ()>,
    {
        let description = format!("{} '{}' to become ready", K::KIND, name);
        let last_seen = Arc::new(Mutex::new("resource not found".to_string()));

        let result = wait_until_condition(
            &description,
            {
                let api = api.clone();
                let name = name.to_string();
                let last_seen = Arc::clone(&last_seen);
                move |phase| {
                    let api = api.clone();
                    let name = name.clone();
                    let last_seen = Arc::clone(&last_seen);
                    async move {
                        let Some(fetched) = api.get_opt(&name).await? else {
                            *last_seen.lock().unwrap() = "resource not found".to_string();
                            return Ok(false);
                        };
                        let view = fetched.readiness();
                        if !view.ready && phase == WaitPhase::LastTry {
                            warn!(
                                "{} '{}' still not ready on final attempt: {}",
                                K::KIND,
                                name,
                                view.state
                            );
                        }
                        *last_seen.lock().unwrap() = view.state;
                        Ok(view.ready)
                    }
                }
            },
            budget,
        )
        .await;

        match result {
            Ok(()) => Ok(api.get(name).await?),
            Err(e @ StagehandError::TimeoutExceeded { .. }) => Err(StagehandError::NotReady {
                kind: K::KIND,
                name: name.to_string(),
                state: last_seen.lock().unwrap().clone(),
                source: Box::new(e),
            }),
            Err(e) => Err(e),
        }
    }
}
