/*
 * error.rs
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

//! Client errors. Closed set: every failure from connect, TLS, send, receive,
//! parse, redirect handling or parameter parsing is one of these.

use std::io;

use thiserror::Error;

/// Errors returned by the HTTP engine and its helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Connect, handshake, write or read exceeded the caller's time budget.
    #[error("request timed out")]
    Timeout,

    /// Transport failure other than a timeout: DNS, refused, reset, TLS handshake.
    #[error("connection failed: {0}")]
    Connection(String),

    /// More redirect hops were required than allowed.
    #[error("maximum redirect limit reached ({max_redirects})")]
    RedirectLimitExceeded { max_redirects: u32 },

    /// Received bytes could not be interpreted as an HTTP response.
    #[error("failed to decode response: {0}")]
    ResponseDecode(String),

    /// Malformed caller input: URL, header/cookie string.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ResponseDecode(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout,
            _ => Error::Connection(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
