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

//! Leaf classification and PVS culling over synthetic maps.

mod common;

use common::*;
use ember_levels::BspFile;
use nalgebra::Vector3;

/// Four leaves, one per x/y quadrant: leaf 0 = (+x, +y), 1 = (+x, -y),
/// 2 = (-x, +y), 3 = (-x, -y).
fn quadrant_map() -> BspFile {
    let file = MapBuilder::new()
        .lump(
            LUMP_PLANES,
            planes_lump(&[([1.0, 0.0, 0.0], 0.0), ([0.0, 1.0, 0.0], 0.0)]),
        )
        .lump(LUMP_NODES, nodes_lump(&[(0, 1, 2), (1, -1, -2), (1, -3, -4)]))
        .lump(
            LUMP_LEAVES,
            leaves_lump(&[
                (0, ([0, 0, -8], [8, 8, 8]), (0, 0), (0, 0)),
                (1, ([0, -8, -8], [8, 0, 8]), (0, 0), (0, 0)),
                (2, ([-8, 0, -8], [0, 8, 8]), (0, 0), (0, 0)),
                (3, ([-8, -8, -8], [0, 0, 8]), (0, 0), (0, 0)),
            ]),
        )
        .build();

    BspFile::from_bytes(&file).unwrap()
}

/// Two leaves split at x = 0, three faces spread across them, and an
/// asymmetric vis matrix: cluster 0 sees both clusters, cluster 1 sees only
/// itself.
fn vis_map() -> BspFile {
    let file = MapBuilder::new()
        .lump(LUMP_TEXTURES, textures_lump(&[("shared/wall", 0, 0)]))
        .lump(LUMP_PLANES, planes_lump(&[([1.0, 0.0, 0.0], 0.0)]))
        .lump(LUMP_NODES, nodes_lump(&[(0, -1, -2)]))
        .lump(
            LUMP_LEAVES,
            leaves_lump(&[
                (0, ([0, -8, -8], [8, 8, 8]), (0, 2), (0, 0)),
                (1, ([-8, -8, -8], [0, 8, 8]), (2, 2), (0, 0)),
            ]),
        )
        .lump(LUMP_LEAF_FACES, indices_lump(&[0, 1, 1, 2]))
        .lump(LUMP_FACES, faces_lump(3))
        .lump(LUMP_VISDATA, visdata_lump(2, 1, &[0b11, 0b10]))
        .build();

    BspFile::from_bytes(&file).unwrap()
}

fn everything_visible(_min: Vector3<f32>, _max: Vector3<f32>) -> bool {
    true
}

#[test]
fn leaf_at_walks_to_the_right_quadrant() {
    let map = quadrant_map();

    assert_eq!(map.leaf_at(Vector3::new(3.0, 2.0, 0.0)), 0);
    assert_eq!(map.leaf_at(Vector3::new(5.0, -1.0, 0.0)), 1);
    assert_eq!(map.leaf_at(Vector3::new(-2.0, 7.0, 0.0)), 2);
    assert_eq!(map.leaf_at(Vector3::new(-4.0, -4.0, 0.0)), 3);
}

#[test]
fn leaf_at_terminates_for_a_grid_of_points() {
    let map = quadrant_map();
    let n_leaves = map.leaves().len();

    for x in -8..=8 {
        for y in -8..=8 {
            for z in -8..=8 {
                let leaf = map.leaf_at(Vector3::new(x as f32, y as f32, z as f32));
                assert!(leaf < n_leaves);
            }
        }
    }
}

#[test]
fn leaf_at_point_on_plane_goes_front() {
    let map = quadrant_map();

    // exactly on both splitting planes: front of each
    assert_eq!(map.leaf_at(Vector3::new(0.0, 0.0, 0.0)), 0);
    // on the x plane only, behind the y plane
    assert_eq!(map.leaf_at(Vector3::new(0.0, -3.0, 0.0)), 1);
}

#[test]
fn cluster_visibility_follows_the_bit_matrix() {
    let map = vis_map();

    assert!(map.cluster_visible_from(0, 0));
    assert!(map.cluster_visible_from(0, 1));
    assert!(map.cluster_visible_from(1, 1));
    // the matrix is asymmetric: 0 sees 1, but 1 doesn't see 0
    assert!(!map.cluster_visible_from(1, 0));
}

#[test]
fn cluster_visibility_fails_open() {
    let vis = vis_map();
    // a viewer outside the world sees everything
    assert!(vis.cluster_visible_from(-1, 0));
    // an invalid target is never visible
    assert!(!vis.cluster_visible_from(0, -1));

    // no vis data at all: everything visible from everywhere
    let map = quadrant_map();
    assert!(map.cluster_visible_from(0, 3));
    assert!(map.cluster_visible_from(3, 0));
}

#[test]
fn visible_faces_dedupe_and_keep_first_seen_order() {
    let map = vis_map();

    // camera in cluster 0, which sees both leaves; face 1 is shared and must
    // appear once
    map.rebuild_visible_faces(Vector3::new(1.0, 0.0, 0.0), &everything_visible);
    assert_eq!(&*map.visible_faces(), &[0, 1, 2]);
}

#[test]
fn visible_faces_respect_the_vis_matrix() {
    let map = vis_map();

    // camera in cluster 1, which sees only its own leaf
    map.rebuild_visible_faces(Vector3::new(-1.0, 0.0, 0.0), &everything_visible);
    assert_eq!(&*map.visible_faces(), &[1, 2]);
}

#[test]
fn visible_faces_respect_the_frustum_test() {
    let map = vis_map();

    // only boxes on the positive-x side pass the injected test
    let frustum = |min: Vector3<f32>, _max: Vector3<f32>| min.x >= 0.0;
    map.rebuild_visible_faces(Vector3::new(1.0, 0.0, 0.0), &frustum);
    assert_eq!(&*map.visible_faces(), &[0, 1]);

    // and each rebuild replaces the previous frame's list
    let nothing = |_min: Vector3<f32>, _max: Vector3<f32>| false;
    map.rebuild_visible_faces(Vector3::new(1.0, 0.0, 0.0), &nothing);
    assert!(map.visible_faces().is_empty());
}
