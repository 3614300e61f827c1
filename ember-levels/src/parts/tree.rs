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

//! The space-partitioning tree a map is organised around

use na::Vector3;

use crate::parts::visdata::ClusterId;

/// Reference to one child of a tree node.
///
/// On disk a child is a single signed integer: non-negative for a node index,
/// negative `c` for leaf `-(c + 1)`. That convention is decoded (and bounds-
/// checked) exactly once at load time, so query code never sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChildRef {
    Node(u32),
    Leaf(u32),
}

/// An interior node of the tree, splitting space along a plane.
///
/// `children[0]` covers the front side of the plane, `children[1]` the back.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub plane_idx: u32,
    pub children: [ChildRef; 2],
    pub min: Vector3<i32>,
    pub max: Vector3<i32>,
}

/// A terminal convex region of the tree.
///
/// The leaf-face and leaf-brush indirection lumps are dereferenced at load
/// time, so `faces_idx`/`brushes_idx` index the global face and brush lists
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Visibility cluster this leaf belongs to. Negative for leaves outside
    /// the playable area.
    pub cluster: ClusterId,
    pub area: i32,
    pub min: Vector3<i32>,
    pub max: Vector3<i32>,
    pub faces_idx: Box<[u32]>,
    pub brushes_idx: Box<[u32]>,
}
