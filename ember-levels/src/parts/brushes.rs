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

/// One brush record, used for collision detection.
///
/// A brush describes a convex volume as the intersection of the half-spaces
/// behind its sides. A point is inside the brush iff it is behind every
/// side's plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub sides: Box<[BrushSide]>,
    pub texture_idx: u32,
}

/// Bounding surface for a brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSide {
    pub plane_idx: u32,
    pub texture_idx: u32,
}
