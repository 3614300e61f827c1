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

use crate::helpers::{slice_to_f32, slice_to_vec3};
use crate::parts::Plane;
use crate::types::{LoadError, Result};

const PLANE_SIZE: usize = (4 * 3) + 4;

/// Parse a lump of planes.
/// A lump is (data length / plane size) planes long.
pub fn from_data(data: &[u8]) -> Result<Box<[Plane]>> {
    if data.len() % PLANE_SIZE != 0 {
        return Err(LoadError::Decode("planes lump not a whole number of records"));
    }
    let length = data.len() / PLANE_SIZE;

    let mut planes = Vec::with_capacity(length);
    for n in 0..length {
        let offset = n * PLANE_SIZE;
        let plane = &data[offset..offset + PLANE_SIZE];
        planes.push(Plane {
            normal: slice_to_vec3(&plane[0..12]),
            dist: slice_to_f32(&plane[12..16]),
        });
    }

    Ok(planes.into_boxed_slice())
}

#[test]
fn planes_parse_two_records() {
    let mut buf = Vec::new();
    for f in &[1.0f32, 0.0, 0.0, 16.0, 0.0, -1.0, 0.0, 2.5] {
        buf.extend_from_slice(&f.to_le_bytes());
    }

    let planes = from_data(&buf).unwrap();
    assert_eq!(planes.len(), 2);
    assert_eq!(planes[0].normal, na::Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(planes[0].dist, 16.0);
    assert_eq!(planes[1].normal, na::Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(planes[1].dist, 2.5);
}

#[test]
fn planes_reject_partial_record() {
    assert!(from_data(&[0u8; PLANE_SIZE + 1]).is_err());
}
