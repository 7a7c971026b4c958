/*
 * request.rs
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

//! HTTP request: method, URL, headers, cookies, optional body, plus the
//! per-call limits (timeout, redirect budget). `serialize` turns one hop of a
//! request into HTTP/1.1 wire bytes.

use std::time::Duration;

use bytes::{BufMut, BytesMut};
use url::Url;

use crate::error::Result;
use crate::protocol::http::FieldMap;
use crate::uri::{form_urlencode, parse_url, Target};

/// Default per-phase timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default number of redirects followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// POST and PUT carry a body (and always a Content-Length); GET and DELETE never do.
    pub fn permits_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Name/value pairs, sent form-urlencoded.
    Form(FieldMap),
    /// Sent as-is (UTF-8).
    Text(String),
}

impl Body {
    /// Encoded payload bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Body::Form(fields) => form_urlencode(fields).into_bytes(),
            Body::Text(text) => text.clone().into_bytes(),
        }
    }
}

impl From<FieldMap> for Body {
    fn from(fields: FieldMap) -> Self {
        Body::Form(fields)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

/// Caller-tunable parts of a request other than method, URL and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: FieldMap,
    pub cookies: FieldMap,
    /// Bounds connect+handshake, the write, and the read-until-close phase, each separately.
    pub timeout: Duration,
    pub max_redirects: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: FieldMap::new(),
            cookies: FieldMap::new(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

/// One logical request. A redirect derives a new request with only the URL changed.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub body: Option<Body>,
    pub options: RequestOptions,
}

impl Request {
    /// Validates the URL (http/https with a host).
    pub fn new(method: Method, url: &str, body: Option<Body>, options: RequestOptions) -> Result<Self> {
        let url = parse_url(url)?;
        if body.is_some() && !method.permits_body() {
            log::warn!("{} request to {} cannot carry a body; dropping it", method, url);
        }
        let body = if method.permits_body() { body } else { None };
        Ok(Self {
            method,
            url,
            body,
            options,
        })
    }

    /// Same method, headers, cookies and body; new URL.
    pub fn redirected(&self, url: Url) -> Self {
        Self {
            method: self.method,
            url,
            body: self.body.clone(),
            options: self.options.clone(),
        }
    }
}

/// Build the wire bytes for one hop:
/// request line, Host, Connection: close, Content-Length (POST/PUT), caller headers,
/// Cookie (when non-empty), blank line, body.
pub fn serialize(method: Method, target: &Target, options: &RequestOptions, body: Option<&Body>) -> BytesMut {
    let payload = if method.permits_body() {
        body.map(Body::encode)
    } else {
        None
    };

    let mut head = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
        method.as_str(),
        target.path,
        target.authority
    );
    if method.permits_body() {
        let len = payload.as_ref().map(Vec::len).unwrap_or(0);
        head.push_str(&format!("Content-Length: {}\r\n", len));
    }
    for (k, v) in &options.headers {
        head.push_str(k);
        head.push_str(": ");
        head.push_str(v);
        head.push_str("\r\n");
    }
    if !options.cookies.is_empty() {
        let cookie = options
            .cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        head.push_str("Cookie: ");
        head.push_str(&cookie);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    let body_len = payload.as_ref().map(Vec::len).unwrap_or(0);
    let mut out = BytesMut::with_capacity(head.len() + body_len);
    out.put_slice(head.as_bytes());
    if let Some(payload) = payload {
        out.put_slice(&payload);
    }
    out
}
