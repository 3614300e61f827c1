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

use crate::helpers::{slice_to_u32, slice_to_vec3};
use crate::parts::Model;
use crate::types::{LoadError, Result};
use std::ops::Range;

const MODEL_SIZE: usize = (4 * 3 * 2) + (4 * 4);

pub fn from_data(data: &[u8], n_faces: u32, n_brushes: u32) -> Result<Box<[Model]>> {
    if data.len() % MODEL_SIZE != 0 {
        return Err(LoadError::Decode("model lump not a whole number of records"));
    }
    let n_models = data.len() / MODEL_SIZE;

    let mut models = Vec::with_capacity(n_models);
    for n in 0..n_models {
        let raw = &data[n * MODEL_SIZE..(n + 1) * MODEL_SIZE];

        let faces_idx = checked_range(slice_to_u32(&raw[24..28]), slice_to_u32(&raw[28..32]), n_faces)
            .ok_or(LoadError::MalformedMap("model references missing face"))?;
        let brushes_idx =
            checked_range(slice_to_u32(&raw[32..36]), slice_to_u32(&raw[36..40]), n_brushes)
                .ok_or(LoadError::MalformedMap("model references missing brush"))?;

        models.push(Model {
            mins: slice_to_vec3(&raw[0..12]),
            maxs: slice_to_vec3(&raw[12..24]),
            faces_idx,
            brushes_idx,
        })
    }

    Ok(models.into_boxed_slice())
}

fn checked_range(offset: u32, n: u32, bound: u32) -> Option<Range<u32>> {
    let end = offset.checked_add(n)?;
    if end > bound {
        return None;
    }
    Some(offset..end)
}

#[test]
fn models_parse_world_model() {
    let mut buf = Vec::new();
    for f in &[-8.0f32, -8.0, 0.0, 8.0, 8.0, 16.0] {
        buf.extend_from_slice(&f.to_le_bytes());
    }
    for v in &[0u32, 4, 0, 2] {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    let models = from_data(&buf, 4, 2).unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].mins, na::Vector3::new(-8.0, -8.0, 0.0));
    assert_eq!(models[0].faces_idx, 0..4);
    assert_eq!(models[0].brushes_idx, 0..2);
}

#[test]
fn models_reject_face_range_past_lump() {
    let mut buf = vec![0u8; 24];
    for v in &[0u32, 5, 0, 0] {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    assert!(matches!(
        from_data(&buf, 4, 0),
        Err(LoadError::MalformedMap(_))
    ));
}
