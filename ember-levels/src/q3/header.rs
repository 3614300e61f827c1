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

use crate::helpers::{slice_to_i32, slice_to_u32};
use crate::types::{LoadError, Result};

const MAGIC_HEADER: &[u8] = &[0x49, 0x42, 0x53, 0x50]; // "IBSP"
const HEADER_LEN: usize = 4 + 4 + (17 * 4 * 2);

/// Indices into the lump directory, in the fixed on-disk order.
pub const LUMP_ENTITIES: usize = 0;
pub const LUMP_TEXTURES: usize = 1;
pub const LUMP_PLANES: usize = 2;
pub const LUMP_NODES: usize = 3;
pub const LUMP_LEAVES: usize = 4;
pub const LUMP_LEAF_FACES: usize = 5;
pub const LUMP_LEAF_BRUSHES: usize = 6;
pub const LUMP_MODELS: usize = 7;
pub const LUMP_BRUSHES: usize = 8;
pub const LUMP_BRUSH_SIDES: usize = 9;
pub const LUMP_VERTICES: usize = 10;
pub const LUMP_MESHVERTS: usize = 11;
pub const LUMP_EFFECTS: usize = 12;
pub const LUMP_FACES: usize = 13;
pub const LUMP_VISDATA: usize = 16;

/// The header found at the start of a (Q3) bsp file
#[derive(Clone, Copy, Debug)]
pub struct Header {
    pub version: i32,
    pub dir_entries: [DirEntry; 17],
}

/// A directory entry, pointing to a lump in the file
#[derive(Clone, Copy, Debug, Default)]
pub struct DirEntry {
    /// Offset from beginning of file to start of lump
    pub offset: u32,

    /// Length of lump in bytes
    pub length: u32,
}

impl Header {
    /// Deserialise from buffer.
    /// # Format
    /// string[4] magic             Magic number. Always "IBSP".
    /// int version                 Version number. 0x2e for the BSP files distributed with Quake 3.
    /// direntry[17] direntries     Lump directory, seventeen entries.
    ///
    /// The magic must match; the version is recorded but deliberately not
    /// checked, callers that care about it can inspect [`Header::version`].
    pub fn from(v: &[u8]) -> Result<Header> {
        if v.len() < HEADER_LEN {
            return Err(LoadError::Decode("truncated header"));
        }

        if &v[0..4] != MAGIC_HEADER {
            return Err(LoadError::Decode("bad magic number"));
        }

        let version = slice_to_i32(&v[4..8]);

        let entries: &[u8] = &v[8..HEADER_LEN];
        let mut dir_entries = [DirEntry::default(); 17];

        for (n, entry) in dir_entries.iter_mut().enumerate() {
            let base = &entries[(n * 8)..(n * 8) + 8];
            *entry = DirEntry {
                offset: slice_to_u32(&base[0..4]),
                length: slice_to_u32(&base[4..8]),
            }
        }

        Ok(Header {
            version,
            dir_entries,
        })
    }

    /// Get the lump at given index from the buffer, with offset & length
    /// based on this directory. Fails rather than slicing past end-of-file.
    pub fn get_lump<'l>(&self, buf: &'l [u8], index: usize) -> Result<&'l [u8]> {
        let entry = self.dir_entries[index];

        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.length as usize)
            .ok_or(LoadError::Decode("lump size overflows"))?;

        if end > buf.len() {
            return Err(LoadError::Decode("lump extends past end of file"));
        }

        Ok(&buf[start..end])
    }
}

#[test]
fn header_rejects_bad_magic() {
    let mut buf = vec![0u8; HEADER_LEN];
    buf[0..4].copy_from_slice(b"FAKE");
    assert!(Header::from(&buf).is_err());
}

#[test]
fn header_parses_directory() {
    let mut buf = vec![0u8; HEADER_LEN + 8];
    buf[0..4].copy_from_slice(b"IBSP");
    buf[4..8].copy_from_slice(&0x2ei32.to_le_bytes());
    // entry 3: offset HEADER_LEN, length 8
    buf[8 + 3 * 8..8 + 3 * 8 + 4].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    buf[8 + 3 * 8 + 4..8 + 3 * 8 + 8].copy_from_slice(&8u32.to_le_bytes());

    let header = Header::from(&buf).unwrap();
    assert_eq!(header.version, 0x2e);
    assert_eq!(header.get_lump(&buf, 3).unwrap().len(), 8);
    assert_eq!(header.get_lump(&buf, 0).unwrap().len(), 0);
}

#[test]
fn header_rejects_lump_past_eof() {
    let mut buf = vec![0u8; HEADER_LEN];
    buf[0..4].copy_from_slice(b"IBSP");
    buf[8..12].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    buf[12..16].copy_from_slice(&64u32.to_le_bytes());

    let header = Header::from(&buf).unwrap();
    assert!(header.get_lump(&buf, 0).is_err());
}
