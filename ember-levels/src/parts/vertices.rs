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

use na::{Vector2, Vector3};

use crate::types::Rgba;

/// A vertex, used to describe a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub tex: TexCoord,
    pub color: Rgba,
}

/// Surface and lightmap texture coordinates for a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub surface: Vector2<f32>,
    pub lightmap: Vector2<f32>,
}

/// A vertex offset, used to build triangle index buffers from a face's
/// vertex range.
pub type MeshVert = u32;
