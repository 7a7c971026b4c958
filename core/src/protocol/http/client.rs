/*
 * client.rs
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

//! HTTP client: runs one request to a terminal response, following redirects
//! up to the request's budget. Each hop opens, uses and closes its own connection.
//!
//! The verb functions (`get`, `post`, `put`, `delete`) are blocking: each call
//! starts a current-thread runtime, drives the request on it, and tears it down.

use crate::error::{Error, Result};
use crate::protocol::http::connection::HttpConnection;
use crate::protocol::http::h1::parse_response;
use crate::protocol::http::request::{serialize, Body, Method, Request, RequestOptions};
use crate::protocol::http::Response;
use crate::uri::{resolve_location, Target};

/// HTTP client. `HttpClient::execute(request)` from async code; the free functions otherwise.
pub struct HttpClient;

impl HttpClient {
    /// Run the request, following 301/302/303/307/308 responses that carry a Location.
    /// Method, headers, cookies and body are kept unchanged across redirects.
    /// Fails with `RedirectLimitExceeded` once more than `max_redirects` hops would be needed.
    pub async fn execute(request: Request) -> Result<Response> {
        let max_redirects = request.options.max_redirects;
        let mut request = request;
        let mut hops: u32 = 0;
        loop {
            let response = Self::hop(&request).await?;
            if !response.is_redirect() {
                return Ok(response);
            }
            let next = match response.headers().get_ignore_case("Location") {
                Some(location) => resolve_location(&request.url, location)?,
                None => {
                    log::warn!(
                        "{} from {} without Location; treating as final",
                        response.status_code(),
                        request.url
                    );
                    return Ok(response);
                }
            };
            hops += 1;
            if hops > max_redirects {
                log::warn!("giving up on {} after {} redirects", next, max_redirects);
                return Err(Error::RedirectLimitExceeded { max_redirects });
            }
            log::info!("redirecting to {} ({} of {})", next, hops, max_redirects);
            request = request.redirected(next);
        }
    }

    /// One exchange: serialize, connect, send, read to close, parse.
    async fn hop(request: &Request) -> Result<Response> {
        let target = Target::from_url(&request.url)?;
        let wire = serialize(request.method, &target, &request.options, request.body.as_ref());
        log::debug!("{} {}", request.method, request.url);
        let conn = HttpConnection::open(&target, request.options.timeout).await?;
        let raw = conn.exchange(&wire).await?;
        if raw.is_empty() {
            // A DELETE answered by a bare close is taken as success without content.
            if request.method == Method::Delete {
                log::debug!("empty reply to DELETE {}; assuming 204", request.url);
                return Ok(Response::no_content());
            }
            return Err(Error::decode("empty response"));
        }
        parse_response(&raw)
    }
}

/// Run a prepared request to completion, blocking the calling thread.
/// Inside a tokio runtime this fails with `Connection`; use `HttpClient::execute` there.
pub fn send(request: Request) -> Result<Response> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::connection(
            "blocking request made from inside an async runtime; use HttpClient::execute",
        ));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::connection(format!("cannot start I/O runtime: {}", e)))?;
    runtime.block_on(HttpClient::execute(request))
}

pub fn request(method: Method, url: &str, body: Option<Body>, options: RequestOptions) -> Result<Response> {
    send(Request::new(method, url, body, options)?)
}

pub fn get(url: &str, options: RequestOptions) -> Result<Response> {
    request(Method::Get, url, None, options)
}

pub fn post(url: &str, body: Option<Body>, options: RequestOptions) -> Result<Response> {
    request(Method::Post, url, body, options)
}

pub fn put(url: &str, body: Option<Body>, options: RequestOptions) -> Result<Response> {
    request(Method::Put, url, body, options)
}

pub fn delete(url: &str, options: RequestOptions) -> Result<Response> {
    request(Method::Delete, url, None, options)
}
