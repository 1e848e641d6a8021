// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Namespace management for tenant project namespaces.

use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

use crate::error::{Result, StagehandError};

/// Check whether a namespace exists.
pub async fn namespace_exists(client: &Client, name: &str) -> Result<bool> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    match namespaces.get_opt(name).await {
        Ok(found) => Ok(found.is_some()),
        Err(e) => Err(StagehandError::Namespace(format!(
            "Failed to check namespace {}: {}",
            name, e
        ))),
    }
}

/// Create a namespace.
pub async fn create_namespace(client: &Client, name: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    namespaces
        .create(&PostParams::default(), &ns)
        .await
        .map_err(|e| {
            StagehandError::Namespace(format!("Failed to create namespace {}: {}", name, e))
        })?;
    info!("Namespace {} created", name);
    Ok(())
}

/// Ensure a namespace exists, creating it if absent.
#[instrument(skip(client))]
pub async fn ensure_namespace(client: &Client, name: &str) -> Result<()> {
    if namespace_exists(client, name).await? {
        debug!("Namespace {} already exists", name);
        return Ok(());
    }
    create_namespace(client, name).await
}
