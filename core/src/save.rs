/*
 * save.rs
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

//! Persist response bodies as numbered files: `<dir>/saved_contents<N>.html`,
//! N being the count of regular files already in the directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::protocol::http::Response;

const FILE_PREFIX: &str = "saved_contents";
const FILE_SUFFIX: &str = ".html";

fn count_files(dir: &Path) -> io::Result<usize> {
    let mut n = 0;
    for entry in fs::read_dir(dir)? {
        if entry?.file_type()?.is_file() {
            n += 1;
        }
    }
    Ok(n)
}

/// Write the body of `response` into `dir`, creating `dir` if needed. Returns the file path.
pub fn save_response(response: &Response, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let index = count_files(dir)?;
    let path = dir.join(format!("{}{}{}", FILE_PREFIX, index, FILE_SUFFIX));
    fs::write(&path, response.body().as_bytes())?;
    log::info!("saved {} bytes to {}", response.body().len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::http::FieldMap;

    fn response(body: &str) -> Response {
        Response::new(200, FieldMap::new(), body.to_string())
    }

    #[test]
    fn creates_directory_and_numbers_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("html");

        let first = save_response(&response("<p>one</p>"), &dir).unwrap();
        assert_eq!(first, dir.join("saved_contents0.html"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "<p>one</p>");

        let second = save_response(&response("<p>two</p>"), &dir).unwrap();
        assert_eq!(second, dir.join("saved_contents1.html"));
        assert_eq!(fs::read_to_string(&second).unwrap(), "<p>two</p>");
    }

    #[test]
    fn subdirectories_do_not_count() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        let path = save_response(&response(""), tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("saved_contents0.html"));
    }
}
