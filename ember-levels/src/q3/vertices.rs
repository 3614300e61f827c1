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

use crate::helpers::{slice_to_u32, slice_to_vec2, slice_to_vec3};
use crate::parts::{MeshVert, TexCoord, Vertex};
use crate::types::{LoadError, Result, Rgba};

/// The size of one vertex record.
const VERTEX_SIZE: usize = (4 * 3) + (2 * 2 * 4) + (4 * 3) + 4;

/// Parse the vertices lump.
///
/// Vertex records are decoded field by field: the on-disk order (position,
/// both texcoord pairs, normal, colour) doesn't match the in-memory layout,
/// so no flat copy is possible.
pub fn verts_from_data(data: &[u8]) -> Result<Box<[Vertex]>> {
    if data.len() % VERTEX_SIZE != 0 {
        return Err(LoadError::Decode("vertex lump not a whole number of records"));
    }
    let length = data.len() / VERTEX_SIZE;

    let mut vertices = Vec::with_capacity(length);
    for n in 0..length {
        let offset = n * VERTEX_SIZE;
        let vertex = &data[offset..offset + VERTEX_SIZE];

        // The decoded colour is discarded: vertex lighting is disabled in
        // this build and every vertex renders opaque white.
        // TODO: carry the decoded colour through once lightmap shading lands.
        let _ = Rgba::from_slice(&vertex[40..44]);

        vertices.push(Vertex {
            position: slice_to_vec3(&vertex[0..12]),
            tex: TexCoord {
                surface: slice_to_vec2(&vertex[12..20]),
                lightmap: slice_to_vec2(&vertex[20..28]),
            },
            normal: slice_to_vec3(&vertex[28..40]),
            color: Rgba::white(),
        })
    }

    Ok(vertices.into_boxed_slice())
}

/// Parse the given data as a list of MeshVerts.
pub fn meshverts_from_data(data: &[u8]) -> Result<Box<[MeshVert]>> {
    if data.len() % 4 != 0 {
        return Err(LoadError::Decode("meshvert lump not a whole number of records"));
    }
    let length = data.len() / 4;

    let mut meshverts = Vec::with_capacity(length);
    for n in 0..length {
        meshverts.push(slice_to_u32(&data[n * 4..(n + 1) * 4]))
    }

    Ok(meshverts.into_boxed_slice())
}

#[test]
fn vertices_decode_in_disk_order() {
    let mut buf = Vec::new();
    for f in &[
        1.0f32, 2.0, 3.0, // position
        0.5, 0.25, // surface texcoord
        0.125, 0.0625, // lightmap texcoord
        0.0, 0.0, 1.0, // normal
    ] {
        buf.extend_from_slice(&f.to_le_bytes());
    }
    buf.extend_from_slice(&[10, 20, 30, 40]); // colour

    let verts = verts_from_data(&buf).unwrap();
    assert_eq!(verts.len(), 1);
    assert_eq!(verts[0].position, na::Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(verts[0].tex.surface, na::Vector2::new(0.5, 0.25));
    assert_eq!(verts[0].tex.lightmap, na::Vector2::new(0.125, 0.0625));
    assert_eq!(verts[0].normal, na::Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn vertices_colour_is_forced_white() {
    let mut buf = vec![0u8; VERTEX_SIZE];
    buf[40..44].copy_from_slice(&[10, 20, 30, 40]);

    let verts = verts_from_data(&buf).unwrap();
    assert_eq!(verts[0].color, Rgba::white());
}

#[test]
fn meshverts_parse_and_reject_misalignment() {
    let buf: Vec<u8> = [0u32, 1, 2, 2, 1, 3]
        .iter()
        .flat_map(|v| v.to_le_bytes().to_vec())
        .collect();

    let meshverts = meshverts_from_data(&buf).unwrap();
    assert_eq!(&*meshverts, &[0, 1, 2, 2, 1, 3]);

    assert!(meshverts_from_data(&buf[..7]).is_err());
}
