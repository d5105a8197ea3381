// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod credential;
pub mod error;
pub mod kubernetes;
pub mod manifest;
pub mod provision;

#[cfg(test)]
pub mod test_utils;
