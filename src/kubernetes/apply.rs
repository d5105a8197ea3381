// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Server-side apply of the rendered manifest

use crate::constants::FIELD_MANAGER;
use crate::error::{ProvisionError, Result};
use crate::manifest::Manifest;
use kube::{
    api::{Patch, PatchParams},
    Api, Client, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Apply every document of the manifest in order, stopping at the first failure.
///
/// Documents applied before a failure are left in place.
#[instrument(skip(client, manifest), fields(namespace = %namespace))]
pub async fn apply_manifest(client: &Client, manifest: &Manifest, namespace: &str) -> Result<()> {
    apply(Api::all(client.clone()), &manifest.cluster_role).await?;
    apply(Api::all(client.clone()), &manifest.cluster_role_binding).await?;
    apply(Api::namespaced(client.clone(), namespace), &manifest.service_account).await?;
    apply(Api::namespaced(client.clone(), namespace), &manifest.token_secret).await?;
    Ok(())
}

/// Create or update a single object
async fn apply<K>(api: Api<K>, object: &K) -> Result<K>
where
    K: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned,
{
    let kind = K::kind(&()).to_string();
    let name = object.name_any();

    debug!("Applying {} '{}'", kind, name);

    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = api
        .patch(&name, &pp, &Patch::Apply(object))
        .await
        .map_err(|source| ProvisionError::ApplyError {
            kind: kind.clone(),
            name: name.clone(),
            source,
        })?;

    info!("{} '{}' applied", kind, name);
    Ok(applied)
}
