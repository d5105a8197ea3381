// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed builders for the RBAC objects and token secret of a service account.

use crate::constants::{rbac, token_secret};
use k8s_openapi::api::core::v1::{Secret, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject};
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// Identity of the service account being provisioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTarget {
    pub name: String,
    pub namespace: String,
}

impl ProvisionTarget {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Name of the service-account-token secret
    pub fn token_secret_name(&self) -> String {
        format!("{}{}", self.name, token_secret::NAME_SUFFIX)
    }
}

/// The four documents applied for a target, in apply order
#[derive(Debug, Clone)]
pub struct Manifest {
    pub cluster_role: ClusterRole,
    pub cluster_role_binding: ClusterRoleBinding,
    pub service_account: ServiceAccount,
    pub token_secret: Secret,
}

impl Manifest {
    pub fn render(target: &ProvisionTarget) -> Self {
        Self {
            cluster_role: cluster_role(target),
            cluster_role_binding: cluster_role_binding(target),
            service_account: service_account(target),
            token_secret: token_secret(target),
        }
    }

    /// Serialize as a multi-document YAML stream
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let documents = [
            serde_yaml::to_string(&self.cluster_role)?,
            serde_yaml::to_string(&self.cluster_role_binding)?,
            serde_yaml::to_string(&self.service_account)?,
            serde_yaml::to_string(&self.token_secret)?,
        ];
        Ok(documents
            .iter()
            .map(|doc| format!("---\n{}", doc))
            .collect::<String>())
    }
}

fn cluster_role(target: &ProvisionTarget) -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            ..Default::default()
        },
        rules: Some(vec![PolicyRule {
            api_groups: Some(vec![rbac::API_GROUP.to_string()]),
            resources: Some(rbac::RESOURCES.iter().map(|s| s.to_string()).collect()),
            verbs: rbac::VERBS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

fn cluster_role_binding(target: &ProvisionTarget) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: target.name.clone(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: target.name.clone(),
            namespace: Some(target.namespace.clone()),
            ..Default::default()
        }]),
    }
}

fn service_account(target: &ProvisionTarget) -> ServiceAccount {
    ServiceAccount {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            namespace: Some(target.namespace.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn token_secret(target: &ProvisionTarget) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(target.token_secret_name()),
            namespace: Some(target.namespace.clone()),
            annotations: Some(BTreeMap::from([(
                token_secret::SERVICE_ACCOUNT_ANNOTATION.to_string(),
                target.name.clone(),
            )])),
            ..Default::default()
        },
        type_: Some(token_secret::TYPE.to_string()),
        ..Default::default()
    }
}
