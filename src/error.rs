// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("No current context selected in kubeconfig: {0}")]
    NoContext(String),

    #[error("Failed to apply {kind} '{name}': {source}")]
    ApplyError {
        kind: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Namespace creation failed: {0}")]
    NamespaceError(String),

    #[error(
        "Token for secret '{secret}' was not populated after {attempts} attempts; \
         check that the kube-controller-manager token controller is running"
    )]
    TokenTimeout { secret: String, attempts: u32 },

    #[error("Extracted credential is empty (token length: {token_len}, ca.crt length: {ca_len})")]
    EmptyCredential { token_len: usize, ca_len: usize },

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Invalid API server URL: {0}")]
    InvalidServerUrl(String),

    #[error("Failed to render manifest: {0}")]
    RenderError(#[from] serde_yaml::Error),

    #[error("Interrupted while waiting for the service account token")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
