// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for kubeconfig handling, manifest apply, namespace bootstrap
//! and token polling.

pub mod apply;
pub mod kubeconfig;
pub mod namespaces;
pub mod token;

pub use apply::apply_manifest;
pub use kubeconfig::{load_kubeconfig, preflight, ActiveContext};
pub use namespaces::ensure_namespace_exists;
pub use token::{extract_credential, wait_for_token, TokenState};
