// Copyright 2026, Stagehand authors
// SPDX-License-Identifier: Apache-2.0

/// Label selector identifying the gateway infrastructure workloads.
pub const GATEWAY_COMPONENT_SELECTOR: &str = "component=iot";

/// The fixed set of workload deployments that a ready gateway
/// configuration is expected to have rolled out. Kept sorted so it can
/// be compared against a sorted listing directly.
pub const EXPECTED_GATEWAY_DEPLOYMENTS: [&str; 6] = [
    "iot-auth-service",
    "iot-device-registry",
    "iot-gc",
    "iot-http-adapter",
    "iot-mqtt-adapter",
    "iot-tenant-service",
];

/// Address space and address plan names.
pub mod plans {
    pub const STANDARD_UNLIMITED: &str = "standard-unlimited";
    pub const STANDARD_SMALL_ANYCAST: &str = "standard-small-anycast";
    pub const STANDARD_SMALL_QUEUE: &str = "standard-small-queue";
}

/// Polling and budget defaults, overridable per call or via environment.
pub mod defaults {
    /// Fixed interval between readiness polls, in seconds.
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Budget for a gateway configuration to initialize and roll out.
    pub const CONFIG_READY_TIMEOUT_SECS: u64 = 5 * 60;
    /// Budget for a tenant project (and its linked space) to become ready.
    pub const PROJECT_READY_TIMEOUT_SECS: u64 = 10 * 60;
    /// Budget for a deletion to be observed during teardown.
    pub const DELETE_TIMEOUT_SECS: u64 = 5 * 60;
}
