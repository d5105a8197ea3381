// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace bootstrap for the service account

use crate::error::{ProvisionError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// Ensure the target namespace exists, creating it when missing
#[instrument(skip(client))]
pub async fn ensure_namespace_exists(client: &Client, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    if namespaces
        .get_opt(namespace)
        .await
        .map_err(|e| ProvisionError::NamespaceError(format!("Failed to look up {}: {}", namespace, e)))?
        .is_some()
    {
        debug!("Namespace {} already exists", namespace);
        return Ok(());
    }

    info!("Creating namespace {}", namespace);
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    match namespaces.create(&PostParams::default(), &ns).await {
        Ok(_) => Ok(()),
        // Created concurrently by someone else
        Err(kube::Error::Api(err)) if err.code == 409 => Ok(()),
        Err(e) => Err(ProvisionError::NamespaceError(format!(
            "Failed to create namespace {}: {}",
            namespace, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{namespace_json, not_found_json, status_json, MockService};

    #[tokio::test]
    async fn test_existing_namespace_is_not_recreated() {
        let mock = MockService::new().on_get(
            "/api/v1/namespaces/security",
            200,
            &namespace_json("security"),
        );
        let client = mock.clone().into_client();

        ensure_namespace_exists(&client, "security").await.unwrap();

        assert_eq!(mock.count("POST", "/api/v1/namespaces"), 0);
    }

    #[tokio::test]
    async fn test_missing_namespace_is_created() {
        let mock = MockService::new()
            .on_get(
                "/api/v1/namespaces/security",
                404,
                &not_found_json("namespaces", "security"),
            )
            .on_post("/api/v1/namespaces", 201, &namespace_json("security"));
        let client = mock.clone().into_client();

        ensure_namespace_exists(&client, "security").await.unwrap();

        assert_eq!(mock.count("POST", "/api/v1/namespaces"), 1);
    }

    #[tokio::test]
    async fn test_namespace_created_concurrently() {
        let mock = MockService::new()
            .on_get(
                "/api/v1/namespaces/security",
                404,
                &not_found_json("namespaces", "security"),
            )
            .on_post(
                "/api/v1/namespaces",
                409,
                &status_json(409, "AlreadyExists", "namespaces \"security\" already exists"),
            );

        ensure_namespace_exists(&mock.into_client(), "security")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_namespace_creation_forbidden() {
        let mock = MockService::new()
            .on_get(
                "/api/v1/namespaces/security",
                404,
                &not_found_json("namespaces", "security"),
            )
            .on_post(
                "/api/v1/namespaces",
                403,
                &status_json(403, "Forbidden", "namespaces is forbidden"),
            );

        let err = ensure_namespace_exists(&mock.into_client(), "security")
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::NamespaceError(_)));
    }
}
