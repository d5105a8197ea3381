// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env as vars, poll};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Bounds for the token readiness poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            attempts: poll::ATTEMPTS,
            interval: Duration::from_secs(poll::INTERVAL_SECS),
        }
    }
}

/// Provisioning configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Name shared by the ClusterRole, ClusterRoleBinding and ServiceAccount
    pub name: String,
    pub namespace: String,
    /// Replaces the host of the API server URL, keeping its port
    pub api_server_public_ip: Option<String>,
    pub poll: PollSettings,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let name = get(vars::NAME).unwrap_or_else(|| defaults::NAME.to_string());
        let namespace = get(vars::NAMESPACE).unwrap_or_else(|| defaults::NAMESPACE.to_string());
        let api_server_public_ip = get(vars::API_SERVER_PUBLIC_IP).map(|v| v.trim().to_string());

        let mut poll = PollSettings::default();
        if let Some(attempts) = get(vars::TOKEN_POLL_ATTEMPTS) {
            poll.attempts = attempts
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer", vars::TOKEN_POLL_ATTEMPTS))?;
            if poll.attempts == 0 {
                bail!("{} must be at least 1", vars::TOKEN_POLL_ATTEMPTS);
            }
        }
        if let Some(secs) = get(vars::TOKEN_POLL_INTERVAL_SECS) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("{} must be a number of seconds", vars::TOKEN_POLL_INTERVAL_SECS)
            })?;
            poll.interval = Duration::from_secs(secs);
        }

        let dry_run: bool = get(vars::DRY_RUN)
            .map(|v| v.trim().parse::<bool>())
            .transpose()
            .with_context(|| format!("{} must be 'true' or 'false'", vars::DRY_RUN))?
            .unwrap_or(false);

        Ok(Config {
            name,
            namespace,
            api_server_public_ip,
            poll,
            dry_run,
        })
    }
}
