/*
 * mod.rs
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

//! HTTP/1.1 client over raw sockets, one connection per exchange.
//!
//! - Request: method, URL, headers, cookies, optional body; serialized by `request::serialize`.
//! - Connection: plain TCP or rustls TLS, write all, read until the peer closes.
//! - H1 parser: status line, headers, body from the complete buffer.
//! - Client: redirect loop with a hop budget; blocking verb functions.

mod fields;
mod response;

pub mod client;
pub mod connection;
pub mod h1;
pub mod request;

pub use client::{delete, get, post, put, request, send, HttpClient};
pub use connection::{HttpConnection, HttpStream};
pub use fields::FieldMap;
pub use request::{Body, Method, Request, RequestOptions, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};
pub use response::Response;
