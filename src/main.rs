// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use sa_provision::config::Config;
use sa_provision::kubernetes::load_kubeconfig;
use sa_provision::provision::{execute, Outcome};

const BANNER: &str = "==============================================================";

#[tokio::main]
async fn main() -> Result<()> {
    // Warnings and errors to stderr, progress to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout))
        .init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: name={}, namespace={}",
        config.name, config.namespace
    );
    let (name, namespace) = (config.name.clone(), config.namespace.clone());

    let kubeconfig = load_kubeconfig()?;
    match execute(config, &kubeconfig, |context| async move { context.client().await }).await? {
        Outcome::Rendered(yaml) => print!("{}", yaml),
        Outcome::Provisioned(credential) => {
            println!("{}", BANNER);
            println!("Credential for service account {}/{}:", namespace, name);
            println!();
            println!("{}", credential.package());
            println!();
            println!("{}", BANNER);
        }
    }

    Ok(())
}
