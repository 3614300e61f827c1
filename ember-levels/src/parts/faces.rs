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

use na::Vector3;
use std::ops::Range;

/// How a face's vertex data is to be interpreted.
///
/// Only `Polygon` and `Mesh` faces take part in rendering; patches and
/// billboards are decoded but left to specialised collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceType {
    Polygon,
    Patch,
    Mesh,
    Billboard,
}

/// A renderable surface in the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub face_type: FaceType,
    pub texture_idx: u32,
    pub effect_idx: Option<u32>,

    /// Vertices making up this face.
    pub vertices_idx: Range<u32>,

    /// Offsets into `vertices_idx` describing triangles.
    pub meshverts_idx: Range<u32>,

    pub normal: Vector3<f32>,
}
