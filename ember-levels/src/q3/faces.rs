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

use crate::helpers::{slice_to_i32, slice_to_u32, slice_to_vec3};
use crate::parts::{Face, FaceType};
use crate::types::{LoadError, Result};
use std::ops::Range;

const FACE_SIZE: usize = (4 * 8) + (4 * 2) + (4 * 2) + (4 * 3) + ((4 * 2) * 3) + (4 * 3) + (4 * 2);

pub fn from_data(
    data: &[u8],
    n_textures: u32,
    n_effects: u32,
    n_vertices: u32,
    n_meshverts: u32,
) -> Result<Box<[Face]>> {
    if data.len() % FACE_SIZE != 0 {
        return Err(LoadError::Decode("face lump not a whole number of records"));
    }
    let length = data.len() / FACE_SIZE;

    let mut faces = Vec::with_capacity(length);
    for n in 0..length {
        faces.push(face_from_slice(
            &data[n * FACE_SIZE..(n + 1) * FACE_SIZE],
            n_textures,
            n_effects,
            n_vertices,
            n_meshverts,
        )?);
    }

    Ok(faces.into_boxed_slice())
}

fn face_from_slice(
    data: &[u8],
    n_textures: u32,
    n_effects: u32,
    n_vertices: u32,
    n_meshverts: u32,
) -> Result<Face> {
    let texture_idx = slice_to_u32(&data[0..4]);
    if texture_idx >= n_textures {
        return Err(LoadError::MalformedMap("face references missing texture"));
    }

    // a negative effect index means "no effect"
    let effect_idx = match slice_to_i32(&data[4..8]) {
        e if e < 0 => None,
        e if (e as u32) < n_effects => Some(e as u32),
        _ => return Err(LoadError::MalformedMap("face references missing effect")),
    };

    let face_type = match slice_to_i32(&data[8..12]) {
        1 => FaceType::Polygon,
        2 => FaceType::Patch,
        3 => FaceType::Mesh,
        4 => FaceType::Billboard,
        _ => return Err(LoadError::Decode("unknown face type tag")),
    };

    let vertices_idx = checked_range(
        slice_to_u32(&data[12..16]),
        slice_to_u32(&data[16..20]),
        n_vertices,
    )
    .ok_or(LoadError::MalformedMap("face references missing vertex"))?;

    let meshverts_idx = checked_range(
        slice_to_u32(&data[20..24]),
        slice_to_u32(&data[24..28]),
        n_meshverts,
    )
    .ok_or(LoadError::MalformedMap("face references missing meshvert"))?;

    // 28..84 holds the lightmap window and basis vectors, which this core
    // doesn't consume
    let normal = slice_to_vec3(&data[84..96]);

    Ok(Face {
        face_type,
        texture_idx,
        effect_idx,
        vertices_idx,
        meshverts_idx,
        normal,
    })
}

fn checked_range(offset: u32, n: u32, bound: u32) -> Option<Range<u32>> {
    let end = offset.checked_add(n)?;
    if end > bound {
        return None;
    }
    Some(offset..end)
}

#[cfg(test)]
fn face_bytes(texture: i32, effect: i32, face_type: i32, vertex: (u32, u32), meshvert: (u32, u32)) -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&texture.to_le_bytes());
    raw.extend_from_slice(&effect.to_le_bytes());
    raw.extend_from_slice(&face_type.to_le_bytes());
    raw.extend_from_slice(&vertex.0.to_le_bytes());
    raw.extend_from_slice(&vertex.1.to_le_bytes());
    raw.extend_from_slice(&meshvert.0.to_le_bytes());
    raw.extend_from_slice(&meshvert.1.to_le_bytes());
    raw.extend_from_slice(&[0u8; 56]); // lightmap fields
    for f in &[0.0f32, 0.0, 1.0] {
        raw.extend_from_slice(&f.to_le_bytes());
    }
    raw.extend_from_slice(&[0u8; 8]); // patch size
    raw
}

#[test]
fn faces_parse_polygon() {
    let buf = face_bytes(0, -1, 1, (2, 4), (0, 6));

    let faces = from_data(&buf, 1, 0, 6, 6).unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_type, FaceType::Polygon);
    assert_eq!(faces[0].effect_idx, None);
    assert_eq!(faces[0].vertices_idx, 2..6);
    assert_eq!(faces[0].meshverts_idx, 0..6);
    assert_eq!(faces[0].normal, na::Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn faces_reject_unknown_type_tag() {
    let buf = face_bytes(0, -1, 7, (0, 0), (0, 0));
    assert!(matches!(
        from_data(&buf, 1, 0, 0, 0),
        Err(LoadError::Decode(_))
    ));
}

#[test]
fn faces_reject_vertex_range_past_lump() {
    let buf = face_bytes(0, -1, 1, (4, 4), (0, 0));
    assert!(matches!(
        from_data(&buf, 1, 0, 6, 0),
        Err(LoadError::MalformedMap(_))
    ));
}
