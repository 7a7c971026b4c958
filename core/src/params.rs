/*
 * params.rs
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

//! Header and cookie strings from the command line: `"k1:v1;k2=v2"`.
//! Pairs are separated by `;`; a pair splits on `:` when it has one, else on `=`.

use crate::error::{Error, Result};
use crate::protocol::http::FieldMap;

/// Parse a parameter string into an ordered map. Blank input gives an empty map.
pub fn parse_params(raw: &str) -> Result<FieldMap> {
    let mut out = FieldMap::new();
    for pair in raw.trim().split(';') {
        if pair.trim().is_empty() {
            continue;
        }
        let sep = if pair.contains(':') { ':' } else { '=' };
        let parts: Vec<&str> = pair.split(sep).map(str::trim).collect();
        match parts.as_slice() {
            [key, value] if !key.is_empty() => {
                out.insert(*key, *value);
            }
            _ => return Err(Error::invalid(format!("invalid pair format: {}", pair.trim()))),
        }
    }
    Ok(out)
}
