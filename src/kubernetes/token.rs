// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for the token controller and reading the populated secret

use crate::config::PollSettings;
use crate::constants::token_secret::{CA_KEY, TOKEN_KEY};
use crate::credential::Credential;
use crate::error::{ProvisionError, Result};
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Readiness of a service account token secret
#[derive(Debug)]
pub enum TokenState {
    /// Secret missing, or present with an empty `token` field
    Waiting,
    Ready(Secret),
}

impl TokenState {
    /// The secret only counts as ready once the token controller has filled in `token`
    pub fn of(secret: Option<Secret>) -> Self {
        match secret {
            Some(secret) if !field(&secret, TOKEN_KEY).is_empty() => TokenState::Ready(secret),
            _ => TokenState::Waiting,
        }
    }
}

/// Poll until the named secret carries a token, for at most `poll.attempts` reads.
#[instrument(skip(client, poll))]
pub async fn wait_for_token(
    client: &Client,
    namespace: &str,
    secret_name: &str,
    poll: &PollSettings,
) -> Result<Secret> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    for attempt in 1..=poll.attempts {
        match secrets.get_opt(secret_name).await {
            Ok(secret) => {
                if let TokenState::Ready(secret) = TokenState::of(secret) {
                    info!("Token for secret '{}' is ready", secret_name);
                    return Ok(secret);
                }
                debug!(
                    "Token for secret '{}' not populated yet (attempt {}/{})",
                    secret_name, attempt, poll.attempts
                );
            }
            Err(e) => {
                warn!(
                    "Error reading secret '{}' (attempt {}/{}): {}",
                    secret_name, attempt, poll.attempts, e
                );
            }
        }

        if attempt < poll.attempts {
            sleep(poll.interval).await;
        }
    }

    Err(ProvisionError::TokenTimeout {
        secret: format!("{}/{}", namespace, secret_name),
        attempts: poll.attempts,
    })
}

/// Read token and CA certificate from a ready secret
pub fn extract_credential(secret: &Secret, server: String) -> Result<Credential> {
    Credential::new(server, field(secret, TOKEN_KEY), field(secret, CA_KEY))
}

fn field<'a>(secret: &'a Secret, key: &str) -> &'a [u8] {
    secret
        .data
        .as_ref()
        .and_then(|d| d.get(key))
        .map(|v| v.0.as_slice())
        .unwrap_or_default()
}
