// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig loading, current-context checks and client creation

use crate::error::{ProvisionError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, instrument};

/// The kubeconfig context selected for provisioning
#[derive(Debug, Clone)]
pub struct ActiveContext {
    pub context: String,
    pub cluster: String,
    /// API server URL of the context's cluster, as written in kubeconfig
    pub server: String,
    kubeconfig: Kubeconfig,
}

/// Read kubeconfig from `KUBECONFIG` or the default location
pub fn load_kubeconfig() -> Result<Kubeconfig> {
    Kubeconfig::read().map_err(|e| {
        ProvisionError::KubeconfigError(format!(
            "{}; a configured kubeconfig is required to reach the cluster",
            e
        ))
    })
}

/// Check that a current context is selected and resolve its cluster.
///
/// Performs no API calls.
pub fn preflight(kubeconfig: &Kubeconfig) -> Result<ActiveContext> {
    let Some(context_name) = kubeconfig
        .current_context
        .as_deref()
        .filter(|c| !c.is_empty())
    else {
        return Err(ProvisionError::NoContext(
            "set one with `kubectl config use-context <name>`".to_string(),
        ));
    };

    let Some(context) = kubeconfig
        .contexts
        .iter()
        .find(|c| c.name == context_name)
        .and_then(|c| c.context.as_ref())
    else {
        return Err(ProvisionError::NoContext(format!(
            "current context '{}' is not defined",
            context_name
        )));
    };

    let Some(server) = kubeconfig
        .clusters
        .iter()
        .find(|c| c.name == context.cluster)
        .and_then(|c| c.cluster.as_ref())
        .and_then(|c| c.server.clone())
    else {
        return Err(ProvisionError::KubeconfigError(format!(
            "cluster '{}' of context '{}' has no server URL",
            context.cluster, context_name
        )));
    };

    debug!(
        "Using context '{}' (cluster '{}', server {})",
        context_name, context.cluster, server
    );

    Ok(ActiveContext {
        context: context_name.to_string(),
        cluster: context.cluster.clone(),
        server,
        kubeconfig: kubeconfig.clone(),
    })
}

impl ActiveContext {
    /// Create a Kubernetes client bound to this context
    #[instrument(skip(self), fields(context = %self.context))]
    pub async fn client(&self) -> Result<Client> {
        let options = KubeConfigOptions {
            context: Some(self.context.clone()),
            ..Default::default()
        };

        let client_config = kube::Config::from_custom_kubeconfig(self.kubeconfig.clone(), &options)
            .await
            .map_err(|e| ProvisionError::KubeconfigError(format!("Failed to create config: {}", e)))?;

        Client::try_from(client_config)
            .map_err(|e| ProvisionError::KubeconfigError(format!("Failed to create client: {}", e)))
    }
}
