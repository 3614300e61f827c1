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

//! Parses cluster-to-cluster visibility information

use bitvec::prelude::*;

use crate::helpers::slice_to_i32;
use crate::types::{LoadError, Result};

/// Parse the visdata lump into one bit row per cluster.
///
/// Row `a`, bit `b` is set iff cluster `b` is visible from cluster `a`; the
/// matrix is not required to be symmetric. An empty lump is allowed and means
/// no precomputed visibility (everything treated as visible).
pub fn from_data(data: &[u8]) -> Result<Box<[BitBox<Lsb0, u8>]>> {
    if data.is_empty() {
        return Ok(Vec::new().into_boxed_slice());
    }
    if data.len() < 8 {
        return Err(LoadError::Decode("truncated visdata lump"));
    }

    let n_vecs = slice_to_i32(&data[0..4]);
    let size_vecs = slice_to_i32(&data[4..8]);
    if n_vecs < 0 || size_vecs < 0 {
        return Err(LoadError::Decode("negative visdata dimensions"));
    }

    let (n_vecs, size_vecs) = (n_vecs as usize, size_vecs as usize);
    let total = n_vecs
        .checked_mul(size_vecs)
        .ok_or(LoadError::Decode("visdata size overflows"))?;

    if data.len() - 8 != total {
        return Err(LoadError::Decode("visdata length doesn't match dimensions"));
    }

    let mut vecs = Vec::with_capacity(n_vecs);
    for n in 0..n_vecs {
        let offset = 8 + (n * size_vecs);
        let slice = &data[offset..offset + size_vecs];
        vecs.push(BitBox::from_slice(slice));
    }

    Ok(vecs.into_boxed_slice())
}

#[cfg(test)]
fn visdata_bytes(n_vecs: i32, size_vecs: i32, rows: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&n_vecs.to_le_bytes());
    buf.extend_from_slice(&size_vecs.to_le_bytes());
    buf.extend_from_slice(rows);
    buf
}

#[test]
fn visdata_bit_layout_is_lsb_first() {
    // cluster 0 sees clusters 0 and 1; cluster 1 sees only itself
    let buf = visdata_bytes(2, 1, &[0b0000_0011, 0b0000_0010]);

    let rows = from_data(&buf).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0][0]);
    assert!(rows[0][1]);
    assert!(!rows[1][0]);
    assert!(rows[1][1]);
}

#[test]
fn visdata_rejects_short_payload() {
    let buf = visdata_bytes(2, 2, &[0u8; 3]);
    assert!(from_data(&buf).is_err());
}

#[test]
fn visdata_empty_lump_means_no_data() {
    assert_eq!(from_data(&[]).unwrap().len(), 0);
}
