// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! End-to-end provisioning of a read-only service account credential.

use crate::config::Config;
use crate::credential::{resolve_server_url, Credential};
use crate::error::{ProvisionError, Result};
use crate::kubernetes::{
    apply_manifest, ensure_namespace_exists, extract_credential, preflight, wait_for_token,
    ActiveContext,
};
use crate::manifest::{Manifest, ProvisionTarget};
use kube::config::Kubeconfig;
use kube::Client;
use std::future::{pending, Future};
use std::io;
use tracing::{debug, info, instrument, warn};

/// Result of a completed run
#[derive(Debug)]
pub enum Outcome {
    /// Dry run: the manifest as multi-document YAML
    Rendered(String),
    Provisioned(Credential),
}

/// Check the kubeconfig context, then render or provision.
///
/// `connect` is only called once preflight has passed and the run is not a dry run,
/// so a missing context never reaches the cluster.
pub async fn execute<C, Fut>(config: Config, kubeconfig: &Kubeconfig, connect: C) -> Result<Outcome>
where
    C: FnOnce(ActiveContext) -> Fut,
    Fut: Future<Output = Result<Client>>,
{
    let context = preflight(kubeconfig)?;
    info!("Using kubeconfig context '{}'", context.context);

    if config.dry_run {
        let target = ProvisionTarget::new(&config.name, &config.namespace);
        return Ok(Outcome::Rendered(Manifest::render(&target).to_yaml()?));
    }

    let server = context.server.clone();
    let client = connect(context).await?;
    info!("Connected to Kubernetes cluster at {}", server);

    let credential = Provisioner::new(client, config).run(&server).await?;
    Ok(Outcome::Provisioned(credential))
}

/// Completes when `signal` reports an interrupt. A signal that cannot be watched
/// never completes, so the run is not cancelled by mistake.
async fn interrupted<S>(signal: S)
where
    S: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Unable to listen for Ctrl-C, cancellation disabled: {}", e);
        pending::<()>().await;
    }
}

pub struct Provisioner {
    client: Client,
    config: Config,
}

impl Provisioner {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub fn target(&self) -> ProvisionTarget {
        ProvisionTarget::new(&self.config.name, &self.config.namespace)
    }

    /// Provision the service account and return its credential, aborting on Ctrl-C
    /// while waiting for the token.
    pub async fn run(&self, server: &str) -> Result<Credential> {
        self.run_until(server, interrupted(tokio::signal::ctrl_c()))
            .await
    }

    /// Provision the service account; `cancel` completing while the token is awaited
    /// aborts with [`ProvisionError::Cancelled`].
    #[instrument(skip(self, cancel), fields(name = %self.config.name, namespace = %self.config.namespace))]
    pub async fn run_until<F>(&self, server: &str, cancel: F) -> Result<Credential>
    where
        F: Future<Output = ()>,
    {
        let target = self.target();
        let server = resolve_server_url(server, self.config.api_server_public_ip.as_deref())?;
        debug!("Resolved API server URL: {}", server);

        ensure_namespace_exists(&self.client, &target.namespace).await?;

        let manifest = Manifest::render(&target);
        info!("Applying service account '{}' and RBAC resources", target.name);
        apply_manifest(&self.client, &manifest, &target.namespace).await?;

        let secret_name = target.token_secret_name();
        info!("Waiting for token secret '{}' to be populated...", secret_name);
        let secret = tokio::select! {
            secret = wait_for_token(&self.client, &target.namespace, &secret_name, &self.config.poll) => secret?,
            _ = cancel => return Err(ProvisionError::Cancelled),
        };

        let credential = extract_credential(&secret, server)?;
        info!(
            "Extracted credential (token length: {}, ca.crt length: {})",
            credential.token.len(),
            credential.ca_cert.len()
        );
        Ok(credential)
    }
}
