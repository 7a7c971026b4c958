/*
 * connection.rs
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

//! HTTP connection: one TCP or TLS stream used for exactly one exchange.
//! Connect (+ handshake), write the whole request, read until the peer closes.
//! Every phase is bounded by the caller's timeout.

use bytes::BytesMut;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

use crate::error::{Error, Result};
use crate::net::upgrade_to_tls;
use crate::uri::Target;

const READ_CHUNK: usize = 8192;

/// Run an I/O future under a deadline: elapsed is `Timeout`, I/O errors are classified by kind.
pub async fn bounded<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(Error::from),
        Err(_) => Err(Error::Timeout),
    }
}

/// Unified stream: plain TCP or TLS. Implements AsyncRead + AsyncWrite.
pub enum HttpStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for HttpStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for HttpStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_flush(cx),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

/// Single-use connection. Consumed by `exchange`, so the socket is closed when it returns.
pub struct HttpConnection {
    stream: HttpStream,
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConnection {
    /// Connect to the target's host and port; TLS handshake (SNI = host) for https.
    /// Connect and handshake together are bounded by `timeout`.
    pub async fn open(target: &Target, timeout: Duration) -> Result<Self> {
        let host = target.host.clone();
        let port = target.port;
        let secure = target.scheme.is_secure();
        log::debug!("connecting to {}:{} (tls: {})", host, port, secure);
        let stream = bounded(timeout, async {
            let tcp = TcpStream::connect((host.as_str(), port)).await?;
            if secure {
                let tls = upgrade_to_tls(tcp, &host).await?;
                Ok(HttpStream::Tls(Box::new(tls)))
            } else {
                Ok(HttpStream::Plain(tcp))
            }
        })
        .await?;
        Ok(Self {
            stream,
            host,
            port,
            timeout,
        })
    }

    pub fn is_secure(&self) -> bool {
        matches!(self.stream, HttpStream::Tls(_))
    }

    /// Write the whole request and flush.
    async fn send(&mut self, request: &[u8]) -> Result<()> {
        let stream = &mut self.stream;
        bounded(self.timeout, async {
            stream.write_all(request).await?;
            stream.flush().await
        })
        .await?;
        log::debug!("sent {} bytes to {}:{}", request.len(), self.host, self.port);
        Ok(())
    }

    /// Read until the peer closes. A TLS peer that closes without close_notify ends the stream too.
    async fn read_to_close(&mut self) -> Result<BytesMut> {
        let secure = self.is_secure();
        let stream = &mut self.stream;
        let buf = bounded(self.timeout, async {
            let mut buf = BytesMut::with_capacity(READ_CHUNK);
            let mut tmp = [0u8; READ_CHUNK];
            loop {
                match stream.read(&mut tmp).await {
                    Ok(0) => break,
                    Ok(n) => buf.extend_from_slice(&tmp[..n]),
                    Err(e) if secure && e.kind() == io::ErrorKind::UnexpectedEof => break,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
            Ok(buf)
        })
        .await?;
        log::debug!("received {} bytes from {}:{}", buf.len(), self.host, self.port);
        Ok(buf)
    }

    /// Send the request and return every byte the peer sent before closing.
    pub async fn exchange(mut self, request: &[u8]) -> Result<BytesMut> {
        self.send(request).await?;
        self.read_to_close().await
    }
}
