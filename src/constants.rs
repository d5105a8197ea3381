// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply
pub const FIELD_MANAGER: &str = "sa-provision";

/// Defaults applied when the corresponding environment variable is unset or empty
pub mod defaults {
    pub const NAME: &str = "hypershield";
    pub const NAMESPACE: &str = "hypershield";
}

/// Environment variable names
pub mod env {
    pub const NAME: &str = "NAME";
    pub const NAMESPACE: &str = "NAMESPACE";
    pub const API_SERVER_PUBLIC_IP: &str = "API_SERVER_PUBLIC_IP";
    pub const TOKEN_POLL_ATTEMPTS: &str = "TOKEN_POLL_ATTEMPTS";
    pub const TOKEN_POLL_INTERVAL_SECS: &str = "TOKEN_POLL_INTERVAL_SECS";
    pub const DRY_RUN: &str = "DRY_RUN";
}

/// Read-only access granted by the ClusterRole
pub mod rbac {
    pub const API_GROUP: &str = "hypershield.cisco.com";
    pub const RESOURCES: &[&str] = &["agents", "policies", "workloads"];
    pub const VERBS: &[&str] = &["get", "list", "watch"];
}

/// Service account token secret layout
pub mod token_secret {
    pub const TYPE: &str = "kubernetes.io/service-account-token";
    /// Annotation binding the secret to its service account
    pub const SERVICE_ACCOUNT_ANNOTATION: &str = "kubernetes.io/service-account.name";
    pub const TOKEN_KEY: &str = "token";
    pub const CA_KEY: &str = "ca.crt";
    pub const NAME_SUFFIX: &str = "-token";
}

/// Token polling configuration
pub mod poll {
    pub const ATTEMPTS: u32 = 30;
    pub const INTERVAL_SECS: u64 = 1;
}
