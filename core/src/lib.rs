/*
 * lib.rs
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

//! Sockhttp core: an HTTP/1.1 client built directly on TCP and rustls sockets.
//!
//! Requests are serialized by hand, sent over a fresh connection with
//! `Connection: close`, read until the peer closes, parsed, and redirected up
//! to a bounded number of hops. Failures are one of the variants of [`Error`].

pub mod error;
pub mod net;
pub mod params;
pub mod protocol;
pub mod save;
pub mod uri;

pub use error::{Error, Result};
pub use params::parse_params;
pub use protocol::http::{
    delete, get, post, put, request, send, Body, FieldMap, HttpClient, Method, Request,
    RequestOptions, Response, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT,
};
pub use save::save_response;
