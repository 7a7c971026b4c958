/*
 * http_integration.rs
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

//! End-to-end tests for the HTTP client against throwaway local servers on
//! 127.0.0.1. Each server answers every connection with a canned reply and
//! closes, recording the raw requests it saw.
//!
//! The live HTTPS test needs network access:
//!   cargo test -p sockhttp_core --test http_integration -- --ignored --nocapture

use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sockhttp_core::{
    Body, Error, FieldMap, HttpClient, Method, Request, RequestOptions,
};

/// Raw requests received, in arrival order.
type Seen = Arc<Mutex<Vec<String>>>;

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|n| n + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

async fn read_request(sock: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        if let Some(end) = head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).into_owned();
            if buf.len() >= end + content_length(&head) {
                break;
            }
        }
        let n = sock.read(&mut tmp).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve forever; `reply(hit_index, port)` gives the bytes for each connection.
async fn serve<F>(reply: F) -> (u16, Seen)
where
    F: Fn(usize, u16) -> Vec<u8> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    tokio::spawn(async move {
        loop {
            let (mut sock, _) = match listener.accept().await {
                Ok(s) => s,
                Err(_) => return,
            };
            let request = read_request(&mut sock).await;
            let hit = {
                let mut log = log.lock().unwrap();
                log.push(request);
                log.len() - 1
            };
            let bytes = reply(hit, port);
            let _ = sock.write_all(&bytes).await;
            let _ = sock.shutdown().await;
        }
    });
    (port, seen)
}

fn options() -> RequestOptions {
    RequestOptions::default().timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn always_redirecting_server_stops_after_exactly_max_hops() {
    let (port, seen) = serve(|_, _| b"HTTP/1.1 302 Found\r\nLocation: /again\r\n\r\n".to_vec()).await;
    let req = Request::new(
        Method::Get,
        &format!("http://127.0.0.1:{}/", port),
        None,
        options().max_redirects(3),
    )
    .unwrap();
    let err = HttpClient::execute(req).await.unwrap_err();
    assert_eq!(err, Error::RedirectLimitExceeded { max_redirects: 3 });
    // initial request plus three followed redirects
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn zero_redirect_budget_rejects_first_redirect() {
    let (port, seen) = serve(|_, _| b"HTTP/1.1 301 Moved Permanently\r\nLocation: /x\r\n\r\n".to_vec()).await;
    let req = Request::new(
        Method::Delete,
        &format!("http://127.0.0.1:{}/", port),
        None,
        options().max_redirects(0),
    )
    .unwrap();
    let err = HttpClient::execute(req).await.unwrap_err();
    assert!(matches!(err, Error::RedirectLimitExceeded { max_redirects: 0 }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn see_other_keeps_method_body_headers_and_cookies() {
    let (port, seen) = serve(|hit, _| {
        if hit == 0 {
            b"HTTP/1.1 303 See Other\r\nlocation: /done?step=2\r\n\r\n".to_vec()
        } else {
            b"HTTP/1.1 201 Created\r\nX-Step: 2\r\n\r\ncreated".to_vec()
        }
    })
    .await;
    let opts = options()
        .header("X-Token", "abc")
        .cookie("session", "s1");
    let req = Request::new(
        Method::Post,
        &format!("http://127.0.0.1:{}/start", port),
        Some(Body::Form(FieldMap::from([("key", "value")]))),
        opts,
    )
    .unwrap();
    let resp = HttpClient::execute(req).await.unwrap();
    assert_eq!(resp.status_code(), 201);
    assert_eq!(resp.header("X-Step"), Some("2"));
    assert_eq!(resp.body(), "created");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].starts_with("POST /start HTTP/1.1\r\n"));
    assert!(seen[1].starts_with("POST /done?step=2 HTTP/1.1\r\n"));
    for raw in seen.iter() {
        assert!(raw.contains(&format!("Host: 127.0.0.1:{}\r\n", port)));
        assert!(raw.contains("Connection: close\r\n"));
        assert!(raw.contains("Content-Length: 9\r\n"));
        assert!(raw.contains("X-Token: abc\r\n"));
        assert!(raw.contains("Cookie: session=s1\r\n"));
        assert!(raw.ends_with("\r\n\r\nkey=value"));
    }
}

#[tokio::test]
async fn absolute_location_moves_to_other_server() {
    let (second, second_seen) = serve(|_, _| b"HTTP/1.1 200 OK\r\n\r\nlanded".to_vec()).await;
    let (first, _) = serve(move |_, _| {
        format!(
            "HTTP/1.1 307 Temporary Redirect\r\nLocation: http://127.0.0.1:{}/landing\r\n\r\n",
            second
        )
        .into_bytes()
    })
    .await;
    let req = Request::new(Method::Get, &format!("http://127.0.0.1:{}/", first), None, options()).unwrap();
    let resp = HttpClient::execute(req).await.unwrap();
    assert_eq!(resp.body(), "landed");
    let seen = second_seen.lock().unwrap();
    assert!(seen[0].starts_with("GET /landing HTTP/1.1\r\n"));
}

#[tokio::test]
async fn redirect_without_location_is_terminal() {
    let (port, seen) = serve(|_, _| b"HTTP/1.1 302 Found\r\nX-Why: none\r\n\r\n".to_vec()).await;
    let req = Request::new(Method::Get, &format!("http://127.0.0.1:{}/", port), None, options()).unwrap();
    let resp = HttpClient::execute(req).await.unwrap();
    assert_eq!(resp.status_code(), 302);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_reply_to_delete_is_no_content() {
    let (port, _) = serve(|_, _| Vec::new()).await;
    let req = Request::new(Method::Delete, &format!("http://127.0.0.1:{}/item/1", port), None, options()).unwrap();
    let resp = HttpClient::execute(req).await.unwrap();
    assert_eq!(resp.status_code(), 204);
    assert_eq!(resp.body(), "");
    assert!(resp.headers().is_empty());
}

#[tokio::test]
async fn empty_reply_to_get_is_decode_error() {
    let (port, _) = serve(|_, _| Vec::new()).await;
    let req = Request::new(Method::Get, &format!("http://127.0.0.1:{}/", port), None, options()).unwrap();
    let err = HttpClient::execute(req).await.unwrap_err();
    assert!(matches!(err, Error::ResponseDecode(_)));
}

#[tokio::test]
async fn garbage_reply_is_decode_error() {
    let (port, _) = serve(|_, _| b"GARBAGE\r\n\r\n".to_vec()).await;
    let req = Request::new(Method::Put, &format!("http://127.0.0.1:{}/", port), Some(Body::from("x")), options()).unwrap();
    let err = HttpClient::execute(req).await.unwrap_err();
    assert!(matches!(err, Error::ResponseDecode(ref m) if m.contains("GARBAGE")));
}

#[tokio::test]
async fn error_statuses_are_responses() {
    let (port, _) = serve(|_, _| b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\nmissing".to_vec()).await;
    let req = Request::new(Method::Get, &format!("http://127.0.0.1:{}/nope", port), None, options()).unwrap();
    let resp = HttpClient::execute(req).await.unwrap();
    assert_eq!(resp.status_code(), 404);
    assert!(!resp.is_success());
    assert_eq!(resp.body(), "missing");
}

#[test]
fn unsupported_scheme_is_invalid_parameter() {
    let err = sockhttp_core::get("ftp://example.com/", RequestOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

/// The blocking verb functions own their runtime; drive them from a plain thread.
#[test]
fn blocking_get_against_std_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = std::thread::spawn(move || {
        let (mut sock, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut tmp = [0u8; 1024];
        while head_end(&buf).is_none() {
            let n = sock.read(&mut tmp).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&tmp[..n]);
        }
        sock.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 13\r\n\r\nHello, world!").unwrap();
        String::from_utf8(buf).unwrap()
    });

    let resp = sockhttp_core::get(
        &format!("http://127.0.0.1:{}/hello?x=1", port),
        options().header("Accept", "*/*"),
    )
    .unwrap();
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.header("Content-Length"), Some("13"));
    assert_eq!(resp.body(), "Hello, world!");

    let raw = server.join().unwrap();
    assert_eq!(
        raw,
        format!(
            "GET /hello?x=1 HTTP/1.1\r\nHost: 127.0.0.1:{}\r\nConnection: close\r\nAccept: */*\r\n\r\n",
            port
        )
    );
}

#[tokio::test]
async fn blocking_call_inside_runtime_is_error_not_panic() {
    let err = sockhttp_core::get("http://127.0.0.1:9/", options()).unwrap_err();
    assert!(matches!(err, Error::Connection(ref m) if m.contains("HttpClient::execute")), "{:?}", err);
}

#[test]
#[ignore] // requires network
fn live_https_get() {
    let resp = sockhttp_core::get("https://example.com/", RequestOptions::default().timeout(Duration::from_secs(10)))
        .expect("request failed");
    println!("Status: {}", resp.status_code());
    for (name, value) in resp.headers().iter() {
        println!("{}: {}", name, value);
    }
    assert_eq!(resp.status_code(), 200);
    assert!(resp.body().contains("Example Domain"));
}
