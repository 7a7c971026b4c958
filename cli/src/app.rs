/*
 * app.rs
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

//! Command-line arguments: one subcommand per HTTP verb.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sockhttp_core::{parse_params, Body, Method, RequestOptions, DEFAULT_MAX_REDIRECTS};

#[derive(Clone, Debug, Parser)]
#[command(name = "sockhttp", version = env!("CARGO_PKG_VERSION"), about = "HTTP/1.1 client over raw TCP/TLS sockets", long_about = None, propagate_version = true)]
pub struct App {
    /// Log protocol details to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(about = "HTTP GET")]
    Get(CommonArgs),
    #[command(about = "HTTP POST with optional form data or raw body")]
    Post(BodyArgs),
    #[command(about = "HTTP PUT with optional form data or raw body")]
    Put(BodyArgs),
    #[command(about = "HTTP DELETE")]
    Delete(CommonArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CommonArgs {
    /// Absolute http:// or https:// URL.
    pub url: String,

    /// Request headers, "name:value;name:value".
    #[arg(long)]
    pub headers: Option<String>,

    /// Cookies, "name=value;name=value".
    #[arg(long)]
    pub cookies: Option<String>,

    /// Save the response body under --output-dir.
    #[arg(long)]
    pub save: bool,

    #[arg(long, default_value = "html")]
    pub output_dir: PathBuf,

    /// Timeout in milliseconds for each of connect, send and receive.
    #[arg(long, default_value_t = 1000)]
    pub timeout: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: u32,
}

#[derive(Clone, Debug, Args)]
pub struct BodyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Form fields, "name:value;name=value", sent urlencoded.
    #[arg(long, conflicts_with = "body")]
    pub data: Option<String>,

    /// Raw body text, sent unchanged.
    #[arg(long)]
    pub body: Option<String>,
}

impl CommonArgs {
    pub fn options(&self) -> sockhttp_core::Result<RequestOptions> {
        let mut options = RequestOptions::default()
            .timeout(Duration::from_millis(self.timeout))
            .max_redirects(self.max_redirects);
        if let Some(raw) = &self.headers {
            options.headers = parse_params(raw)?;
        }
        if let Some(raw) = &self.cookies {
            options.cookies = parse_params(raw)?;
        }
        Ok(options)
    }
}

impl BodyArgs {
    pub fn body(&self) -> sockhttp_core::Result<Option<Body>> {
        if let Some(raw) = &self.data {
            return Ok(Some(Body::Form(parse_params(raw)?)));
        }
        Ok(self.body.clone().map(Body::Text))
    }
}

impl Commands {
    /// Method, shared arguments, and body (POST/PUT only).
    pub fn into_parts(self) -> sockhttp_core::Result<(Method, CommonArgs, Option<Body>)> {
        Ok(match self {
            Commands::Get(common) => (Method::Get, common, None),
            Commands::Delete(common) => (Method::Delete, common, None),
            Commands::Post(args) => {
                let body = args.body()?;
                (Method::Post, args.common, body)
            }
            Commands::Put(args) => {
                let body = args.body()?;
                (Method::Put, args.common, body)
            }
        })
    }
}
