/*
 * uri.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Sockhttp, a minimal HTTP/1.1 client over raw sockets.
 *
 * Sockhttp is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Sockhttp is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Sockhttp.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Request URLs: http and https only. Splits a URL into what the transport needs
//! (host, port, TLS or not) and what the request line needs (path and query),
//! resolves redirect `Location` values, and form-encodes bodies.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{Host, Url};

use crate::error::{Error, Result};
use crate::protocol::http::FieldMap;

/// application/x-www-form-urlencoded: keep unreserved `-_.~` and alphanumerics.
/// Space is handled separately (encoded as `+`).
const FORM_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URL scheme understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn is_secure(self) -> bool {
        self == Scheme::Https
    }
}

/// Where and what to request for one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    /// Host to connect to (IPv6 literals without brackets). Also the TLS server name.
    pub host: String,
    pub port: u16,
    /// Value of the `Host` header: host, plus `:port` when not the scheme default.
    pub authority: String,
    /// Request-target: path (never empty) and `?query` if present.
    pub path: String,
}

impl Target {
    pub fn from_url(url: &Url) -> Result<Self> {
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(Error::invalid(format!("unsupported URL scheme: {}", other))),
        };
        let (host, host_for_header) = match url.host() {
            Some(Host::Domain(d)) if !d.is_empty() => (d.to_string(), d.to_string()),
            Some(Host::Ipv4(ip)) => (ip.to_string(), ip.to_string()),
            Some(Host::Ipv6(ip)) => (ip.to_string(), format!("[{}]", ip)),
            _ => return Err(Error::invalid(format!("URL has no host: {}", url))),
        };
        let port = url.port().unwrap_or_else(|| scheme.default_port());
        let authority = if port == scheme.default_port() {
            host_for_header
        } else {
            format!("{}:{}", host_for_header, port)
        };
        let mut path = url.path().to_string();
        if path.is_empty() {
            path.push('/');
        }
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }
        Ok(Self {
            scheme,
            host,
            port,
            authority,
            path,
        })
    }
}

/// Parse and validate a caller-supplied absolute URL.
pub fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::invalid(format!("invalid URL {:?}: {}", raw, e)))?;
    Target::from_url(&url)?;
    Ok(url)
}

/// Resolve a redirect `Location` value against the URL of the request that produced it.
/// Absolute values replace the URL; relative values inherit scheme and authority.
pub fn resolve_location(current: &Url, location: &str) -> Result<Url> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::decode("empty Location header"));
    }
    current
        .join(location)
        .map_err(|e| Error::decode(format!("invalid Location {:?}: {}", location, e)))
}

/// Form-encode one name or value.
pub fn encode_form_component(s: &str) -> String {
    s.split(' ')
        .map(|part| utf8_percent_encode(part, FORM_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Form-encode pairs as `k1=v1&k2=v2` in map order.
pub fn form_urlencode(fields: &FieldMap) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_form_component(k), encode_form_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
