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

//! Assembles synthetic map files, byte by byte, for the integration tests.

#![allow(dead_code)]

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

/// Content flag marking a brush as collidable.
pub const CONTENTS_SOLID: u32 = 0x1;

const HEADER_LEN: usize = 4 + 4 + (17 * 4 * 2);

/// Builds a complete map file from raw lump contents.
pub struct MapBuilder {
    lumps: Vec<Vec<u8>>,
}

impl MapBuilder {
    pub fn new() -> MapBuilder {
        MapBuilder {
            lumps: vec![Vec::new(); 17],
        }
    }

    pub fn lump(mut self, index: usize, data: Vec<u8>) -> MapBuilder {
        self.lumps[index] = data;
        self
    }

    /// Assemble the header and lumps into file bytes.
    pub fn build(self) -> Vec<u8> {
        let mut file = Vec::new();
        file.extend_from_slice(b"IBSP");
        file.extend_from_slice(&0x2ei32.to_le_bytes());

        let mut offset = HEADER_LEN;
        for lump in self.lumps.iter() {
            file.extend_from_slice(&(offset as u32).to_le_bytes());
            file.extend_from_slice(&(lump.len() as u32).to_le_bytes());
            offset += lump.len();
        }

        for lump in self.lumps.iter() {
            file.extend_from_slice(lump);
        }

        file
    }
}

/// (name, surface flags, content flags) records.
pub fn textures_lump(entries: &[(&str, u32, u32)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (name, surface, contents) in entries {
        let mut padded = [0u8; 64];
        padded[..name.len()].copy_from_slice(name.as_bytes());
        data.extend_from_slice(&padded);
        data.extend_from_slice(&surface.to_le_bytes());
        data.extend_from_slice(&contents.to_le_bytes());
    }
    data
}

/// (normal, dist) records.
pub fn planes_lump(entries: &[([f32; 3], f32)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (normal, dist) in entries {
        for c in normal {
            data.extend_from_slice(&c.to_le_bytes());
        }
        data.extend_from_slice(&dist.to_le_bytes());
    }
    data
}

/// (plane index, front child, back child) records; children use the on-disk
/// sign convention (negative `c` refers to leaf `-(c + 1)`).
pub fn nodes_lump(entries: &[(u32, i32, i32)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (plane, front, back) in entries {
        data.extend_from_slice(&plane.to_le_bytes());
        data.extend_from_slice(&front.to_le_bytes());
        data.extend_from_slice(&back.to_le_bytes());
        data.extend_from_slice(&[0u8; 24]); // min/max
    }
    data
}

/// (cluster, aabb, leaf-face window, leaf-brush window) records.
pub fn leaves_lump(entries: &[(i32, ([i32; 3], [i32; 3]), (u32, u32), (u32, u32))]) -> Vec<u8> {
    let mut data = Vec::new();
    for (cluster, (min, max), faces, brushes) in entries {
        data.extend_from_slice(&cluster.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes()); // area
        for c in min {
            data.extend_from_slice(&c.to_le_bytes());
        }
        for c in max {
            data.extend_from_slice(&c.to_le_bytes());
        }
        data.extend_from_slice(&faces.0.to_le_bytes());
        data.extend_from_slice(&faces.1.to_le_bytes());
        data.extend_from_slice(&brushes.0.to_le_bytes());
        data.extend_from_slice(&brushes.1.to_le_bytes());
    }
    data
}

/// A flat list of u32s: leaf-faces, leaf-brushes or meshverts.
pub fn indices_lump(list: &[u32]) -> Vec<u8> {
    list.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
}

/// (side window start, side count, texture index) records.
pub fn brushes_lump(entries: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (start, count, texture) in entries {
        data.extend_from_slice(&start.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&texture.to_le_bytes());
    }
    data
}

/// (plane index, texture index) records.
pub fn brush_sides_lump(entries: &[(u32, u32)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (plane, texture) in entries {
        data.extend_from_slice(&plane.to_le_bytes());
        data.extend_from_slice(&texture.to_le_bytes());
    }
    data
}

/// `count` minimal polygon faces with empty vertex ranges, all on texture 0.
pub fn faces_lump(count: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..count {
        data.extend_from_slice(&0i32.to_le_bytes()); // texture
        data.extend_from_slice(&(-1i32).to_le_bytes()); // effect
        data.extend_from_slice(&1i32.to_le_bytes()); // type: polygon
        data.extend_from_slice(&[0u8; 16]); // vertex + meshvert windows
        data.extend_from_slice(&[0u8; 56]); // lightmap fields
        for f in &[0.0f32, 0.0, 1.0] {
            data.extend_from_slice(&f.to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 8]); // patch size
    }
    data
}

/// Vis matrix: one row of `size_vecs` bytes per cluster.
pub fn visdata_lump(n_vecs: i32, size_vecs: i32, rows: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&n_vecs.to_le_bytes());
    data.extend_from_slice(&size_vecs.to_le_bytes());
    data.extend_from_slice(rows);
    data
}

/// A map split at x = 0 by the root node; the front leaf (x >= 0) is empty
/// and the back leaf holds one solid brush spanning
/// x in [-1, 0], y in [-0.5, 0.5], z in [-0.5, 0.5].
///
/// Plane indices: 0 = +x face/split, 1 = -x face, 2..6 = the y/z faces.
pub fn cube_map() -> Vec<u8> {
    MapBuilder::new()
        .lump(
            LUMP_TEXTURES,
            textures_lump(&[("shared/wall", 0, CONTENTS_SOLID)]),
        )
        .lump(
            LUMP_PLANES,
            planes_lump(&[
                ([1.0, 0.0, 0.0], 0.0),
                ([-1.0, 0.0, 0.0], 1.0),
                ([0.0, 1.0, 0.0], 0.5),
                ([0.0, -1.0, 0.0], 0.5),
                ([0.0, 0.0, 1.0], 0.5),
                ([0.0, 0.0, -1.0], 0.5),
            ]),
        )
        .lump(LUMP_NODES, nodes_lump(&[(0, -1, -2)]))
        .lump(
            LUMP_LEAVES,
            leaves_lump(&[
                (0, ([0, -8, -8], [8, 8, 8]), (0, 0), (0, 0)),
                (1, ([-8, -8, -8], [0, 8, 8]), (0, 0), (0, 1)),
            ]),
        )
        .lump(LUMP_LEAF_BRUSHES, indices_lump(&[0]))
        .lump(LUMP_BRUSHES, brushes_lump(&[(0, 6, 0)]))
        .lump(
            LUMP_BRUSH_SIDES,
            brush_sides_lump(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]),
        )
        .build()
}
