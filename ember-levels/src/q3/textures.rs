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

use std::str;

use crate::helpers::slice_to_u32;
use crate::parts::{ContentsFlags, SurfaceFlags, Texture};
use crate::types::{LoadError, Result};

const TEXTURE_LUMP_SIZE: usize = 64 + 4 + 4;

/// Try to parse the given buffer as a textures lump.
/// # Format
/// Each texture is:
/// string[64] name     Texture name, NUL padded.
/// int flags           Surface flags.
/// int contents        Content flags.
pub fn from_data(lump: &[u8]) -> Result<Box<[Texture]>> {
    if lump.len() % TEXTURE_LUMP_SIZE != 0 {
        return Err(LoadError::Decode("textures lump not a whole number of records"));
    }
    let length = lump.len() / TEXTURE_LUMP_SIZE;

    let mut textures = Vec::with_capacity(length);
    for n in 0..length {
        let offset = n * TEXTURE_LUMP_SIZE;
        textures.push(Texture {
            name: str::from_utf8(&lump[offset..offset + 64])
                .map_err(|_| LoadError::Decode("texture name isn't utf-8"))?
                .trim_matches('\0')
                .to_owned(),
            surface: SurfaceFlags::from_bits_truncate(slice_to_u32(&lump[offset + 64..offset + 68])),
            contents: ContentsFlags::from_bits_truncate(slice_to_u32(
                &lump[offset + 68..offset + 72],
            )),
        });
    }

    Ok(textures.into_boxed_slice())
}

#[test]
fn textures_single_texture() {
    let mut buf = vec![0u8; TEXTURE_LUMP_SIZE];
    buf[0..12].copy_from_slice(b"TEST TEXTURE");
    buf[64..68].copy_from_slice(&(0x2u32 | 0x8).to_le_bytes()); // SLICK | LADDER
    buf[68..72].copy_from_slice(&(0x1u32 | 0x8).to_le_bytes()); // SOLID | LAVA

    let lump = from_data(&buf).unwrap();

    assert_eq!(lump.len(), 1);
    assert_eq!(lump[0].name, "TEST TEXTURE");
    assert_eq!(lump[0].surface, SurfaceFlags::SLICK | SurfaceFlags::LADDER);
    assert_eq!(lump[0].contents, ContentsFlags::SOLID | ContentsFlags::LAVA);
}

#[test]
fn textures_reject_partial_record() {
    assert!(from_data(&[0u8; TEXTURE_LUMP_SIZE - 1]).is_err());
}
