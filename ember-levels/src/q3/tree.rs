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

//! Parses the nodes, leaves, leaf-faces and leaf-brushes lumps

use crate::helpers::{slice_to_i32, slice_to_u32, slice_to_vec3i};
use crate::parts::{ChildRef, Leaf, Node};
use crate::types::{LoadError, Result};

const NODE_SIZE: usize = 4 + (4 * 2) + (4 * 3) + (4 * 3);
const LEAF_SIZE: usize = (4 * 6) + (4 * 3 * 2);

/// Parse the four tree-related lumps into node and leaf lists.
///
/// The on-disk sign convention for node children (negative `c` means leaf
/// `-(c + 1)`) is resolved here into [`ChildRef`]s, and every cross-lump
/// index is checked, so the tree handed to query code is known-good.
pub fn from_data(
    nodes_data: &[u8],
    leaves_data: &[u8],
    leaf_faces: &[u8],
    leaf_brushes: &[u8],
    n_planes: u32,
    n_faces: u32,
    n_brushes: u32,
) -> Result<(Box<[Node]>, Box<[Leaf]>)> {
    if nodes_data.len() % NODE_SIZE != 0 || leaves_data.len() % LEAF_SIZE != 0 {
        return Err(LoadError::Decode("tree lump not a whole number of records"));
    }
    if leaf_faces.len() % 4 != 0 || leaf_brushes.len() % 4 != 0 {
        return Err(LoadError::Decode("leaf index lump not a whole number of records"));
    }

    let n_nodes = nodes_data.len() / NODE_SIZE;
    let n_leaves = leaves_data.len() / LEAF_SIZE;

    let mut nodes = Vec::with_capacity(n_nodes);
    for n in 0..n_nodes {
        let raw = &nodes_data[n * NODE_SIZE..(n + 1) * NODE_SIZE];

        let plane_idx = slice_to_u32(&raw[0..4]);
        if plane_idx >= n_planes {
            return Err(LoadError::MalformedMap("node references missing plane"));
        }

        nodes.push(Node {
            plane_idx,
            children: [
                child_from_i32(slice_to_i32(&raw[4..8]), n_nodes, n_leaves)?,
                child_from_i32(slice_to_i32(&raw[8..12]), n_nodes, n_leaves)?,
            ],
            min: slice_to_vec3i(&raw[12..24]),
            max: slice_to_vec3i(&raw[24..36]),
        });
    }

    let mut leaves = Vec::with_capacity(n_leaves);
    for n in 0..n_leaves {
        let raw = &leaves_data[n * LEAF_SIZE..(n + 1) * LEAF_SIZE];

        let faces_idx = resolve_window(&raw[32..40], leaf_faces, n_faces)
            .ok_or(LoadError::MalformedMap("leaf references missing face"))?;
        let brushes_idx = resolve_window(&raw[40..48], leaf_brushes, n_brushes)
            .ok_or(LoadError::MalformedMap("leaf references missing brush"))?;

        leaves.push(Leaf {
            cluster: slice_to_i32(&raw[0..4]),
            area: slice_to_i32(&raw[4..8]),
            min: slice_to_vec3i(&raw[8..20]),
            max: slice_to_vec3i(&raw[20..32]),
            faces_idx,
            brushes_idx,
        });
    }

    Ok((nodes.into_boxed_slice(), leaves.into_boxed_slice()))
}

/// Decode one on-disk child reference.
fn child_from_i32(c: i32, n_nodes: usize, n_leaves: usize) -> Result<ChildRef> {
    if c >= 0 {
        if (c as usize) < n_nodes {
            Ok(ChildRef::Node(c as u32))
        } else {
            Err(LoadError::MalformedMap("node child references missing node"))
        }
    } else {
        let leaf = -(c + 1);
        if (leaf as usize) < n_leaves {
            Ok(ChildRef::Leaf(leaf as u32))
        } else {
            Err(LoadError::MalformedMap("node child references missing leaf"))
        }
    }
}

/// Dereference an (offset, count) window through an indirection lump of
/// u32 indices, checking every index against `bound`.
fn resolve_window(window: &[u8], indices: &[u8], bound: u32) -> Option<Box<[u32]>> {
    let start = slice_to_u32(&window[0..4]) as usize;
    let n = slice_to_u32(&window[4..8]) as usize;

    let end = start.checked_add(n)?;
    if end > indices.len() / 4 {
        return None;
    }

    let mut resolved = Vec::with_capacity(n);
    for i in start..end {
        let idx = slice_to_u32(&indices[i * 4..(i + 1) * 4]);
        if idx >= bound {
            return None;
        }
        resolved.push(idx);
    }

    Some(resolved.into_boxed_slice())
}

#[cfg(test)]
fn node_bytes(plane: u32, front: i32, back: i32) -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&plane.to_le_bytes());
    raw.extend_from_slice(&front.to_le_bytes());
    raw.extend_from_slice(&back.to_le_bytes());
    raw.extend_from_slice(&[0u8; 24]); // min/max
    raw
}

#[cfg(test)]
fn leaf_bytes(cluster: i32, face_window: (u32, u32), brush_window: (u32, u32)) -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&cluster.to_le_bytes());
    raw.extend_from_slice(&0i32.to_le_bytes()); // area
    raw.extend_from_slice(&[0u8; 24]); // min/max
    raw.extend_from_slice(&face_window.0.to_le_bytes());
    raw.extend_from_slice(&face_window.1.to_le_bytes());
    raw.extend_from_slice(&brush_window.0.to_le_bytes());
    raw.extend_from_slice(&brush_window.1.to_le_bytes());
    raw
}

#[test]
fn tree_decodes_sign_encoded_children() {
    let mut nodes_data = node_bytes(0, 1, -1);
    nodes_data.extend(node_bytes(0, -2, -3));

    let mut leaves_data = Vec::new();
    for cluster in 0..3 {
        leaves_data.extend(leaf_bytes(cluster, (0, 0), (0, 0)));
    }

    let (nodes, leaves) = from_data(&nodes_data, &leaves_data, &[], &[], 1, 0, 0).unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(leaves.len(), 3);
    assert_eq!(nodes[0].children, [ChildRef::Node(1), ChildRef::Leaf(0)]);
    assert_eq!(nodes[1].children, [ChildRef::Leaf(1), ChildRef::Leaf(2)]);
}

#[test]
fn tree_resolves_leaf_face_indirection() {
    let leaf_faces: Vec<u8> = [5u32, 7, 9]
        .iter()
        .flat_map(|v| v.to_le_bytes().to_vec())
        .collect();

    let leaves_data = leaf_bytes(0, (1, 2), (0, 0));
    let (_, leaves) = from_data(&[], &leaves_data, &leaf_faces, &[], 0, 10, 0).unwrap();

    assert_eq!(&*leaves[0].faces_idx, &[7, 9]);
}

#[test]
fn tree_rejects_out_of_range_child() {
    let nodes_data = node_bytes(0, 5, -1);
    let leaves_data = leaf_bytes(0, (0, 0), (0, 0));

    assert!(matches!(
        from_data(&nodes_data, &leaves_data, &[], &[], 1, 0, 0),
        Err(LoadError::MalformedMap(_))
    ));
}

#[test]
fn tree_rejects_out_of_range_leaf_brush() {
    let leaf_brushes: Vec<u8> = 3u32.to_le_bytes().to_vec();
    let leaves_data = leaf_bytes(0, (0, 0), (0, 1));

    assert!(matches!(
        from_data(&[], &leaves_data, &[], &leaf_brushes, 0, 0, 2),
        Err(LoadError::MalformedMap(_))
    ));
}
