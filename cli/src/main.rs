/*
 * main.rs
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

//! sockhttp: send one HTTP request, print the final status code.

mod app;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sockhttp_core::save_response;

use crate::app::{App, Commands};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn run(cmd: Commands) -> Result<()> {
    let (method, common, body) = cmd.into_parts()?;
    let options = common.options()?;
    let response = sockhttp_core::request(method, &common.url, body, options)
        .with_context(|| format!("{} {}", method, common.url))?;
    println!("{}", response.status_code());
    if common.save {
        let path = save_response(&response, &common.output_dir)
            .with_context(|| format!("cannot save response to {}", common.output_dir.display()))?;
        println!("saved to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let app = App::parse();
    init_logging(app.verbose);
    match run(app.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
