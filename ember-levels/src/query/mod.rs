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

//! Spatial queries over a loaded map

pub mod culling;
pub mod trace;

use na::Vector3;

/// Frustum/bounds visibility test, supplied by the render collaborator.
///
/// This core doesn't know anything about cameras or projection; it only asks
/// whether an axis-aligned box could be on screen.
pub trait FrustumTest {
    fn aabb_visible(&self, min: Vector3<f32>, max: Vector3<f32>) -> bool;
}

impl<F> FrustumTest for F
where
    F: Fn(Vector3<f32>, Vector3<f32>) -> bool,
{
    fn aabb_visible(&self, min: Vector3<f32>, max: Vector3<f32>) -> bool {
        self(min, max)
    }
}
