/*
 * parser.rs
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

//! HTTP/1.1 response parser over a complete read-until-close buffer:
//! status line, headers up to the first blank line, body after the first CRLFCRLF.
//! No Content-Length or chunked framing; the connection close delimits the body.

use crate::error::{Error, Result};
use crate::protocol::http::{FieldMap, Response};

const HEAD_END: &[u8] = b"\r\n\r\n";

/// Offset of the first CRLFCRLF, or None.
fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_END.len()).position(|w| w == HEAD_END)
}

/// Status code from `HTTP/<version> <code> [<reason>]`.
pub fn parse_status_line(line: &str) -> Result<u16> {
    let malformed = || Error::decode(format!("malformed status line: {:?}", line));
    let mut parts = line.trim_end().splitn(3, ' ');
    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/") {
        return Err(malformed());
    }
    let code = parts.next().ok_or_else(malformed)?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    code.parse::<u16>().map_err(|_| malformed())
}

/// Parse a raw response. Empty input is always an error.
pub fn parse_response(raw: &[u8]) -> Result<Response> {
    if raw.is_empty() {
        return Err(Error::decode("empty response"));
    }
    let (head, body) = match find_head_end(raw) {
        Some(n) => (&raw[..n], &raw[n + HEAD_END.len()..]),
        None => (raw, &raw[raw.len()..]),
    };
    // CR and LF are ASCII, so replacement characters never move a line boundary.
    let head = String::from_utf8_lossy(head);

    let mut lines = head.lines();
    let status_line = match lines.next() {
        Some(l) if !l.trim().is_empty() => l,
        _ => return Err(Error::decode("no status line")),
    };
    let status_code = parse_status_line(status_line)?;

    let mut headers = FieldMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        match line.split_once(": ") {
            Some((name, value)) => {
                headers.insert(name, value);
            }
            None => log::warn!("skipping malformed header line {:?}", line),
        }
    }

    let body = String::from_utf8_lossy(body).into_owned();
    log::debug!(
        "parsed response: status {}, {} headers, {} body bytes",
        status_code,
        headers.len(),
        body.len()
    );
    Ok(Response::new(status_code, headers, body))
}
