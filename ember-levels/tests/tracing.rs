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

//! Collision traces against synthetic brush geometry.

mod common;

use common::*;
use ember_levels::BspFile;
use nalgebra::Vector3;

const TOLERANCE: f32 = 0.01;

fn cube() -> BspFile {
    BspFile::from_bytes(&cube_map()).unwrap()
}

/// The cube map plus a second solid brush spanning x in [2, 3] on the front
/// side of the split, so a trace across the whole map meets two obstacles.
fn two_brush_map() -> BspFile {
    let file = MapBuilder::new()
        .lump(
            LUMP_TEXTURES,
            textures_lump(&[("shared/wall", 0, CONTENTS_SOLID)]),
        )
        .lump(
            LUMP_PLANES,
            planes_lump(&[
                ([1.0, 0.0, 0.0], 0.0),
                ([-1.0, 0.0, 0.0], 1.0),
                ([0.0, 1.0, 0.0], 0.5),
                ([0.0, -1.0, 0.0], 0.5),
                ([0.0, 0.0, 1.0], 0.5),
                ([0.0, 0.0, -1.0], 0.5),
                ([1.0, 0.0, 0.0], 3.0),
                ([-1.0, 0.0, 0.0], -2.0),
            ]),
        )
        .lump(LUMP_NODES, nodes_lump(&[(0, -1, -2)]))
        .lump(
            LUMP_LEAVES,
            leaves_lump(&[
                (0, ([0, -8, -8], [8, 8, 8]), (0, 0), (1, 1)),
                (1, ([-8, -8, -8], [0, 8, 8]), (0, 0), (0, 1)),
            ]),
        )
        .lump(LUMP_LEAF_BRUSHES, indices_lump(&[0, 1]))
        .lump(LUMP_BRUSHES, brushes_lump(&[(0, 6, 0), (6, 6, 0)]))
        .lump(
            LUMP_BRUSH_SIDES,
            brush_sides_lump(&[
                (0, 0),
                (1, 0),
                (2, 0),
                (3, 0),
                (4, 0),
                (5, 0),
                (6, 0),
                (7, 0),
                (2, 0),
                (3, 0),
                (4, 0),
                (5, 0),
            ]),
        )
        .build();

    BspFile::from_bytes(&file).unwrap()
}

#[test]
fn ray_stops_at_the_cube_face() {
    let map = cube();

    let out = map.trace(
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(-5.0, 0.0, 0.0),
        0.0,
    );

    assert!((out.fraction - 0.5).abs() < TOLERANCE, "fraction {}", out.fraction);
    assert!((out.end.x - 0.0).abs() < 0.1);

    let plane = out.plane.expect("should have hit a plane");
    assert_eq!(plane.normal, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(plane.dist, 0.0);

    assert!(out.starts_out);
    assert!(!out.all_solid);
}

#[test]
fn ray_from_the_far_side_hits_the_opposite_face() {
    let map = cube();

    let out = map.trace(
        Vector3::new(-5.0, 0.0, 0.0),
        Vector3::new(5.0, 0.0, 0.0),
        0.0,
    );

    // the cube's -x face sits at x = -1: fraction 0.4 of the 10-unit segment
    assert!((out.fraction - 0.4).abs() < TOLERANCE, "fraction {}", out.fraction);
    assert_eq!(
        out.plane.expect("should have hit a plane").normal,
        Vector3::new(-1.0, 0.0, 0.0)
    );
}

#[test]
fn ray_missing_everything_travels_the_whole_segment() {
    let map = cube();

    let end = Vector3::new(-5.0, 3.0, 0.0);
    let out = map.trace(Vector3::new(5.0, 3.0, 0.0), end, 0.0);

    assert_eq!(out.fraction, 1.0);
    assert_eq!(out.end, end);
    assert_eq!(out.plane, None);
}

#[test]
fn zero_length_trace_is_idempotent() {
    let map = cube();

    let a = Vector3::new(3.0, 0.0, 0.0);
    let out = map.trace(a, a, 0.0);

    assert_eq!(out.fraction, 1.0);
    assert_eq!(out.end, a);
    assert!(out.starts_out);
    assert!(!out.all_solid);
}

#[test]
fn trace_starting_inside_solid_reports_it() {
    let map = cube();

    let out = map.trace(
        Vector3::new(-0.5, 0.0, 0.0),
        Vector3::new(-0.4, 0.0, 0.0),
        0.0,
    );

    assert!(!out.starts_out);
    assert!(out.all_solid);
    assert_eq!(out.fraction, 1.0);
}

#[test]
fn nearer_of_two_brushes_wins() {
    let map = two_brush_map();

    let out = map.trace(
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(-5.0, 0.0, 0.0),
        0.0,
    );

    // the brush at x in [2, 3] is struck first, well before the cube at the
    // origin would be
    assert!((out.fraction - 0.2).abs() < TOLERANCE, "fraction {}", out.fraction);
    let plane = out.plane.expect("should have hit a plane");
    assert_eq!(plane.dist, 3.0);

    // considering more geometry never pushes the fraction back up
    let cube_only = cube().trace(
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(-5.0, 0.0, 0.0),
        0.0,
    );
    assert!(out.fraction <= cube_only.fraction);
}

#[test]
fn sphere_sweep_stops_earlier_than_a_ray() {
    let map = cube();

    let start = Vector3::new(5.0, 0.0, 0.0);
    let end = Vector3::new(-5.0, 0.0, 0.0);

    let ray = map.trace(start, end, 0.0);
    let sphere = map.trace(start, end, 0.25);

    assert!(sphere.fraction < ray.fraction);
    // the sphere's surface, not its centre, touches the face at x = 0
    assert!((sphere.fraction - 0.472).abs() < TOLERANCE, "fraction {}", sphere.fraction);
}

#[test]
fn sphere_grazing_a_face_passes_clean() {
    let map = cube();

    // moving parallel to the top face, a little more than one radius away
    let out = map.trace(
        Vector3::new(-2.0, 0.65, 0.0),
        Vector3::new(1.0, 0.65, 0.0),
        0.1,
    );

    assert_eq!(out.fraction, 1.0);
    assert_eq!(out.plane, None);
}

#[test]
fn blocked_sweep_slides_along_the_wall() {
    let map = cube();

    // move diagonally down-right into the cube's top face
    let start = Vector3::new(-0.9, 1.0, 0.0);
    let end = Vector3::new(-0.2, 0.3, 0.0);
    let radius = 0.1;

    let hit = map.trace(start, end, radius);
    assert!(hit.fraction < 1.0);
    let normal = hit.plane.expect("should have hit the top face").normal;
    assert_eq!(normal, Vector3::new(0.0, 1.0, 0.0));

    // gameplay movement policy: project the remaining motion onto the struck
    // plane and trace again along the wall
    let remaining = end - hit.end;
    let slide = remaining - normal * remaining.dot(&normal);
    let out = map.trace(hit.end, hit.end + slide, radius);

    assert_eq!(out.fraction, 1.0);
    assert!((out.end.x - -0.2).abs() < TOLERANCE);
    assert!(out.end.y > 0.5 + radius);
}
