// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API server URL resolution and the packaged credential format.
//!
//! A packaged credential is `base64(server + "|" + token + "|" + ca_cert)` using the
//! standard padded alphabet, emitted as a single unwrapped line.

use crate::error::{ProvisionError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::net::IpAddr;
use url::Url;

const DELIMITER: &str = "|";

/// Resolve the API server URL, replacing the host with `public_ip` when given.
///
/// The scheme and any explicit port of `server` are kept; the result carries no path.
pub fn resolve_server_url(server: &str, public_ip: Option<&str>) -> Result<String> {
    let Some(public_ip) = public_ip else {
        return Ok(server.to_string());
    };

    let parsed = Url::parse(server)
        .map_err(|e| ProvisionError::InvalidServerUrl(format!("{}: {}", server, e)))?;

    let host = match public_ip.parse::<IpAddr>() {
        Ok(IpAddr::V6(ip)) => format!("[{}]", ip),
        _ => public_ip.to_string(),
    };

    // `Url::port` hides a port equal to the scheme default, so fall back to the text
    let port = parsed
        .port()
        .or_else(|| explicit_port(server).and(parsed.port_or_known_default()));

    Ok(match port {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Trailing `:<port>` of the authority part of `server`, if written out
fn explicit_port(server: &str) -> Option<u16> {
    let (_, rest) = server.split_once("://")?;
    let authority = rest.split(|c| matches!(c, '/' | '?' | '#')).next()?;
    let host_port = authority.rsplit('@').next()?;
    let (_, port) = host_port.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}

/// Credential material for a provisioned service account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub server: String,
    pub token: String,
    pub ca_cert: String,
}

impl Credential {
    /// Build a credential from the raw secret fields, rejecting empty values
    pub fn new(server: String, token: &[u8], ca_cert: &[u8]) -> Result<Self> {
        if token.is_empty() || ca_cert.is_empty() {
            return Err(ProvisionError::EmptyCredential {
                token_len: token.len(),
                ca_len: ca_cert.len(),
            });
        }

        let token = String::from_utf8(token.to_vec())
            .map_err(|e| ProvisionError::InvalidCredential(format!("token is not UTF-8: {}", e)))?;
        let ca_cert = String::from_utf8(ca_cert.to_vec())
            .map_err(|e| ProvisionError::InvalidCredential(format!("ca.crt is not UTF-8: {}", e)))?;

        Ok(Self {
            server,
            token,
            ca_cert,
        })
    }

    /// Encode as a single-line base64 string
    pub fn package(&self) -> String {
        let joined = [self.server.as_str(), self.token.as_str(), self.ca_cert.as_str()].join(DELIMITER);
        STANDARD.encode(joined)
    }

    /// Decode a packaged credential. The CA certificate keeps any embedded newlines.
    pub fn unpack(packaged: &str) -> Result<Self> {
        let raw = STANDARD
            .decode(packaged.trim())
            .map_err(|e| ProvisionError::InvalidCredential(format!("not base64: {}", e)))?;
        let raw = String::from_utf8(raw)
            .map_err(|e| ProvisionError::InvalidCredential(format!("not UTF-8: {}", e)))?;

        let mut parts = raw.splitn(3, DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(server), Some(token), Some(ca_cert)) => {
                Self::new(server.to_string(), token.as_bytes(), ca_cert.as_bytes())
            }
            _ => Err(ProvisionError::InvalidCredential(
                "expected three '|' separated fields".to_string(),
            )),
        }
    }
}
