/*
 * response.rs
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

//! Terminal HTTP response: status code, headers as received, decoded body.

use crate::protocol::http::FieldMap;

/// Parsed response. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    headers: FieldMap,
    body: String,
}

impl Response {
    pub fn new(status_code: u16, headers: FieldMap, body: String) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Stand-in for a peer that closed without sending anything where that is acceptable.
    pub fn no_content() -> Self {
        Self::new(204, FieldMap::new(), String::new())
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &FieldMap {
        &self.headers
    }

    /// Header value by exact (case-sensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.status_code, 301 | 302 | 303 | 307 | 308)
    }
}
