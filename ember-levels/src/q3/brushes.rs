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

//! Parses the brushes & brushsides lumps from a bsp file

use crate::helpers::slice_to_u32;
use crate::parts::{Brush, BrushSide};
use crate::types::{LoadError, Result};

/// The size of one brush record.
const BRUSH_SIZE: usize = 4 * 3;

/// The size of one brushside record.
const SIDE_SIZE: usize = 4 * 2;

/// Parse the brushes & brushsides lumps from a bsp file.
///
/// Each brush's (offset, count) window into the brushsides lump is resolved
/// here, so a [`Brush`] carries its sides directly.
pub fn from_data(
    brushes_data: &[u8],
    sides_data: &[u8],
    n_textures: u32,
    n_planes: u32,
) -> Result<Box<[Brush]>> {
    if brushes_data.len() % BRUSH_SIZE != 0 || sides_data.len() % SIDE_SIZE != 0 {
        return Err(LoadError::Decode("brush lump not a whole number of records"));
    }
    let length = brushes_data.len() / BRUSH_SIZE;

    let mut brushes = Vec::with_capacity(length);
    for n in 0..length {
        let offset = n * BRUSH_SIZE;
        let brush = &brushes_data[offset..offset + BRUSH_SIZE];

        let texture_idx = slice_to_u32(&brush[8..12]);
        if texture_idx >= n_textures {
            return Err(LoadError::MalformedMap("brush references missing texture"));
        }

        brushes.push(Brush {
            sides: get_sides(
                sides_data,
                slice_to_u32(&brush[0..4]),
                slice_to_u32(&brush[4..8]),
                n_textures,
                n_planes,
            )?,
            texture_idx,
        });
    }

    Ok(brushes.into_boxed_slice())
}

/// Internal function to get the relevant brushsides for a brush from the data
/// in the brush lump.
fn get_sides(
    sides_data: &[u8],
    start: u32,
    length: u32,
    n_textures: u32,
    n_planes: u32,
) -> Result<Box<[BrushSide]>> {
    let end = start
        .checked_add(length)
        .ok_or(LoadError::Decode("brushside window overflows"))? as usize;
    if end > sides_data.len() / SIDE_SIZE {
        return Err(LoadError::MalformedMap("brush references missing brushside"));
    }

    let mut sides = Vec::with_capacity(length as usize);

    for n in start as usize..end {
        let offset = n * SIDE_SIZE;
        let side = &sides_data[offset..offset + SIDE_SIZE];

        let plane_idx = slice_to_u32(&side[0..4]);
        if plane_idx >= n_planes {
            return Err(LoadError::MalformedMap("brushside references missing plane"));
        }

        let texture_idx = slice_to_u32(&side[4..8]);
        if texture_idx >= n_textures {
            return Err(LoadError::MalformedMap("brushside references missing texture"));
        }

        sides.push(BrushSide {
            plane_idx,
            texture_idx,
        });
    }

    Ok(sides.into_boxed_slice())
}

#[cfg(test)]
fn side_bytes(plane: u32, texture: u32) -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&plane.to_le_bytes());
    raw.extend_from_slice(&texture.to_le_bytes());
    raw
}

#[cfg(test)]
fn brush_bytes(side_start: u32, side_count: u32, texture: u32) -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&side_start.to_le_bytes());
    raw.extend_from_slice(&side_count.to_le_bytes());
    raw.extend_from_slice(&texture.to_le_bytes());
    raw
}

#[test]
fn brushes_resolve_their_sides() {
    let mut sides_data = side_bytes(0, 0);
    sides_data.extend(side_bytes(1, 0));
    sides_data.extend(side_bytes(2, 0));

    let mut brushes_data = brush_bytes(0, 1, 0);
    brushes_data.extend(brush_bytes(1, 2, 0));

    let brushes = from_data(&brushes_data, &sides_data, 1, 3).unwrap();

    assert_eq!(brushes.len(), 2);
    assert_eq!(brushes[0].sides.len(), 1);
    assert_eq!(brushes[1].sides.len(), 2);
    assert_eq!(brushes[1].sides[0].plane_idx, 1);
    assert_eq!(brushes[1].sides[1].plane_idx, 2);
}

#[test]
fn brushes_reject_side_window_past_lump() {
    let sides_data = side_bytes(0, 0);
    let brushes_data = brush_bytes(0, 2, 0);

    assert!(matches!(
        from_data(&brushes_data, &sides_data, 1, 1),
        Err(LoadError::MalformedMap(_))
    ));
}

#[test]
fn brushes_reject_bad_plane_index() {
    let sides_data = side_bytes(9, 0);
    let brushes_data = brush_bytes(0, 1, 0);

    assert!(matches!(
        from_data(&brushes_data, &sides_data, 1, 1),
        Err(LoadError::MalformedMap(_))
    ));
}
