// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on
/// request method and path, and records every request it serves so
/// tests can assert on call counts and ordering.
///
/// A path can carry a sequence of responses; each request pops the next
/// one and the last response repeats, which lets a test model a
/// resource that exists, is deleted, and is then observed absent.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a fixed response for GET requests matching the exact path.
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on_seq("GET", path, &[(status, body)])
    }

    /// Add a sequence of responses for GET requests on the path; the
    /// last response repeats once the sequence is exhausted.
    pub fn on_get_seq(self, path: &str, responses: &[(u16, &str)]) -> Self {
        self.on_seq("GET", path, responses)
    }

    /// Add a fixed response for POST requests matching the exact path.
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on_seq("POST", path, &[(status, body)])
    }

    /// Add a fixed response for DELETE requests matching the exact path.
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on_seq("DELETE", path, &[(status, body)])
    }

    fn on_seq(self, method: &str, path: &str, responses: &[(u16, &str)]) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            responses
                .iter()
                .map(|(status, body)| (*status, body.to_string()))
                .collect(),
        );
        self
    }

    /// Every request served so far, as (method, path) pairs in arrival
    /// order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// The subset of served requests using the given method.
    pub fn requests_with_method(&self, method: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p)
            .collect()
    }

    /// Build a kube Client from this mock service. The service is
    /// cheaply cloneable, so tests keep a handle for request
    /// assertions and hand a clone to the client.
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        // Exact match first, then prefix match for list/label paths.
        let key = if responses.contains_key(&(method.to_string(), path.to_string())) {
            Some((method.to_string(), path.to_string()))
        } else {
            responses
                .keys()
                .find(|(m, p)| m == method && path.starts_with(p))
                .cloned()
        }?;

        let queue = responses.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a server error status response
pub fn server_error_json(message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": "InternalError",
        "code": 500
    })
    .to_string()
}

/// Gateway configuration JSON with the given initialization state.
pub fn gateway_config_json(name: &str, initialized: bool, state: &str) -> String {
    serde_json::json!({
        "apiVersion": "iot.stagehand.dev/v1alpha1",
        "kind": "GatewayConfig",
        "metadata": { "name": name, "uid": "test-uid" },
        "spec": {},
        "status": { "initialized": initialized, "state": state }
    })
    .to_string()
}

/// Tenant project JSON, optionally linked to a managed address space.
pub fn tenant_project_json(
    name: &str,
    namespace: &str,
    space_name: Option<&str>,
    ready: bool,
) -> String {
    let spec = match space_name {
        Some(space) => serde_json::json!({
            "downstreamStrategy": {
                "managed": {
                    "addressSpace": { "name": space, "plan": "standard-unlimited" }
                }
            }
        }),
        None => serde_json::json!({}),
    };
    serde_json::json!({
        "apiVersion": "iot.stagehand.dev/v1alpha1",
        "kind": "TenantProject",
        "metadata": { "name": name, "namespace": namespace, "uid": "test-uid" },
        "spec": spec,
        "status": { "ready": ready, "phase": if ready { "Active" } else { "Configuring" } }
    })
    .to_string()
}

/// Address space JSON with the given readiness.
pub fn address_space_json(name: &str, namespace: &str, ready: bool) -> String {
    serde_json::json!({
        "apiVersion": "messaging.stagehand.dev/v1alpha1",
        "kind": "AddressSpace",
        "metadata": { "name": name, "namespace": namespace, "uid": "test-uid" },
        "spec": { "type": "standard", "plan": "standard-unlimited" },
        "status": { "isReady": ready, "phase": if ready { "Active" } else { "Configuring" } }
    })
    .to_string()
}

/// Deployment JSON carrying a replica state.
pub fn deployment_json(name: &str, namespace: &str, replicas: i32, ready: i32) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": { "component": "iot" },
            "uid": "test-uid"
        },
        "spec": { "replicas": replicas, "selector": {} },
        "status": { "readyReplicas": ready }
    })
}

/// DeploymentList JSON from individual deployment values.
pub fn deployment_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "DeploymentList",
        "metadata": {},
        "items": items
    })
    .to_string()
}
