/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Shared small types and the load-time error taxonomy.

use std::convert::TryInto;

use thiserror::Error;

/// RGBA Colour (0-255)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub fn white() -> Rgba {
        Rgba {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    /// Interpret the given bytes as an RGBA colour.
    pub fn from_bytes(bytes: [u8; 4]) -> Rgba {
        Rgba {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    /// Convert a slice to an RGBA colour
    /// # Panics
    /// If slice is not 4 bytes long.
    pub fn from_slice(slice: &[u8]) -> Rgba {
        Rgba::from_bytes(slice.try_into().unwrap())
    }
}

/// An error encountered while loading a map.
///
/// Decoding is all-or-nothing: no partial map is ever returned, and queries
/// on a loaded map have no failure mode of their own.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file couldn't be read at all.
    #[error("couldn't read map file: {0}")]
    Io(#[from] std::io::Error),

    /// A lump or the header is truncated, misaligned or otherwise unusable.
    #[error("invalid lump data: {0}")]
    Decode(&'static str),

    /// A decoded index points outside the lump it refers to.
    #[error("map cross-reference out of range: {0}")]
    MalformedMap(&'static str),
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, LoadError>;
