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

//! Figuring out what to render: leaf classification and PVS culling

use std::collections::HashSet;

use na::Vector3;

use crate::parts::{ChildRef, ClusterId};
use crate::q3::file::BspFile;
use crate::query::FrustumTest;

impl BspFile {
    /// Get the index of the leaf containing `point`.
    ///
    /// Descends from the root, following the front child when the point is
    /// on or in front of the node's plane and the back child otherwise. A
    /// point exactly on a plane therefore always classifies to the front.
    pub fn leaf_at(&self, point: Vector3<f32>) -> usize {
        let mut current = ChildRef::Node(0);

        if self.nodes.is_empty() {
            return 0;
        }

        loop {
            match current {
                ChildRef::Leaf(leaf_idx) => return leaf_idx as usize,
                ChildRef::Node(node_idx) => {
                    let node = &self.nodes[node_idx as usize];
                    let plane = &self.planes[node.plane_idx as usize];

                    current = if plane.distance_to(&point) >= 0.0 {
                        node.children[0]
                    } else {
                        node.children[1]
                    };
                }
            }
        }
    }

    /// Get the vis cluster `point` lies in, or a negative id if the point is
    /// outside the mapped world.
    pub fn cluster_at(&self, point: Vector3<f32>) -> ClusterId {
        match self.leaves.get(self.leaf_at(point)) {
            Some(leaf) => leaf.cluster,
            None => -1,
        }
    }

    /// Returns true if `dest` is visible from `from` according to the
    /// precomputed vis matrix.
    ///
    /// Fails open: with no vis data, or a viewer outside the world
    /// (`from < 0`), everything is considered visible. An invalid *target*
    /// cluster is never visible.
    pub fn cluster_visible_from(&self, from: ClusterId, dest: ClusterId) -> bool {
        if self.visdata.is_empty() || from < 0 {
            return true;
        }
        if dest < 0 {
            return false;
        }

        self.visdata
            .get(from as usize)
            .and_then(|row| row.get(dest as usize))
            .map(|bit| *bit)
            .unwrap_or(false)
    }

    /// Rebuild the per-frame visible-face list.
    ///
    /// Called once per frame by the render collaborator's pre-render hook. A
    /// leaf contributes its faces when it passes both the PVS test against
    /// the camera's cluster and the injected frustum test; faces shared by
    /// several visible leaves are listed once, in first-seen order, so draw
    /// order stays deterministic.
    ///
    /// The list is built into a fresh buffer and swapped in under the write
    /// lock, so concurrent readers never observe a half-built frame.
    pub fn rebuild_visible_faces<F: FrustumTest>(&self, camera_pos: Vector3<f32>, frustum: &F) {
        let camera_cluster = self.cluster_at(camera_pos);

        let mut seen = HashSet::with_capacity(self.faces.len());
        let mut visible = Vec::with_capacity(self.faces.len());

        for leaf in self.leaves.iter() {
            if !self.cluster_visible_from(camera_cluster, leaf.cluster) {
                continue;
            }
            if !frustum.aabb_visible(leaf.min.map(|c| c as f32), leaf.max.map(|c| c as f32)) {
                continue;
            }

            for &face_idx in leaf.faces_idx.iter() {
                if seen.insert(face_idx) {
                    visible.push(face_idx);
                }
            }
        }

        *self
            .visible_faces
            .write()
            .unwrap_or_else(|e| e.into_inner()) = visible;
    }
}
