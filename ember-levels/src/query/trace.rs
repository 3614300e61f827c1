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

//! Swept collision queries against the map's brush geometry

use na::Vector3;

use crate::parts::{Brush, ChildRef, ContentsFlags, Plane};
use crate::q3::file::BspFile;

/// Keeps a trace from catching on geometry it is exactly touching.
pub const TRACE_EPSILON: f32 = 1.0 / 32.0;

/// The result of a [`BspFile::trace`] query.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOut {
    /// How far along the segment travel got before being stopped, 0..1.
    /// 1.0 means unobstructed.
    pub fraction: f32,

    /// Where travel ended.
    pub end: Vector3<f32>,

    /// False if the trace began inside a solid brush.
    pub starts_out: bool,

    /// True if the trace never left solid brushes.
    pub all_solid: bool,

    /// The plane that stopped the motion, when something was hit.
    pub plane: Option<Plane>,
}

impl TraceOut {
    fn unobstructed() -> TraceOut {
        TraceOut {
            fraction: 1.0,
            end: Vector3::zeros(),
            starts_out: true,
            all_solid: false,
            plane: None,
        }
    }

    /// Combine two partial results: the closer hit wins the fraction and
    /// plane, solidity flags accumulate.
    fn merge(self, other: TraceOut) -> TraceOut {
        let (fraction, plane) = if other.fraction < self.fraction {
            (other.fraction, other.plane)
        } else {
            (self.fraction, self.plane)
        };

        TraceOut {
            fraction,
            end: self.end,
            starts_out: self.starts_out && other.starts_out,
            all_solid: self.all_solid || other.all_solid,
            plane,
        }
    }
}

/// The segment (and inflation) a trace was asked about. Brush clipping always
/// works on this original segment, whatever sub-segment the tree walk has
/// narrowed to.
struct TraceLine {
    start: Vector3<f32>,
    end: Vector3<f32>,
    radius: f32,
}

impl BspFile {
    /// Sweep a point (`radius == 0`) or a sphere of `radius` from `start` to
    /// `end`, stopping at the first solid brush surface struck.
    ///
    /// The sphere sweep inflates plane distances by `radius` rather than
    /// sweeping a true volume, which is exact for flat walls and slightly
    /// conservative at edges.
    pub fn trace(
        &self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        radius: f32,
    ) -> TraceOut {
        let line = TraceLine { start, end, radius };

        let mut out = if self.nodes.is_empty() {
            if self.leaves.is_empty() {
                TraceOut::unobstructed()
            } else {
                self.clip_leaf(0, &line)
            }
        } else {
            self.clip_child(ChildRef::Node(0), 0.0, 1.0, start, end, &line)
        };

        out.end = if out.fraction >= 1.0 {
            end
        } else {
            start + (end - start) * out.fraction
        };
        out
    }

    /// Walk the tree below `child`, clipping the current sub-segment against
    /// node planes and brush geometry in the leaves.
    fn clip_child(
        &self,
        child: ChildRef,
        start_fraction: f32,
        end_fraction: f32,
        start: Vector3<f32>,
        end: Vector3<f32>,
        line: &TraceLine,
    ) -> TraceOut {
        let node = match child {
            ChildRef::Leaf(leaf_idx) => return self.clip_leaf(leaf_idx as usize, line),
            ChildRef::Node(node_idx) => &self.nodes[node_idx as usize],
        };
        let plane = &self.planes[node.plane_idx as usize];

        let start_dist = plane.distance_to(&start);
        let end_dist = plane.distance_to(&end);

        if start_dist >= line.radius && end_dist >= line.radius {
            // wholly on the front side of the plane
            return self.clip_child(node.children[0], start_fraction, end_fraction, start, end, line);
        }
        if start_dist < -line.radius && end_dist < -line.radius {
            // wholly on the back side of the plane
            return self.clip_child(node.children[1], start_fraction, end_fraction, start, end, line);
        }

        // the segment straddles the plane: split it, nudged by epsilon so the
        // two halves overlap slightly, and walk the nearer side first
        let (near, frac1, frac2) = if start_dist < end_dist {
            let inv = 1.0 / (start_dist - end_dist);
            (
                1,
                (start_dist - line.radius + TRACE_EPSILON) * inv,
                (start_dist + line.radius + TRACE_EPSILON) * inv,
            )
        } else if end_dist < start_dist {
            let inv = 1.0 / (start_dist - end_dist);
            (
                0,
                (start_dist + line.radius + TRACE_EPSILON) * inv,
                (start_dist - line.radius - TRACE_EPSILON) * inv,
            )
        } else {
            (0, 1.0, 0.0)
        };
        let frac1 = clamp01(frac1);
        let frac2 = clamp01(frac2);

        let mid_fraction = start_fraction + (end_fraction - start_fraction) * frac1;
        let mid = start + (end - start) * frac1;
        let near_out = self.clip_child(
            node.children[near],
            start_fraction,
            mid_fraction,
            start,
            mid,
            line,
        );

        let mid_fraction = start_fraction + (end_fraction - start_fraction) * frac2;
        let mid = start + (end - start) * frac2;
        let far_out = self.clip_child(
            node.children[near ^ 1],
            mid_fraction,
            end_fraction,
            mid,
            end,
            line,
        );

        near_out.merge(far_out)
    }

    /// Clip the trace against every solid brush referenced by a leaf.
    fn clip_leaf(&self, leaf_idx: usize, line: &TraceLine) -> TraceOut {
        let leaf = &self.leaves[leaf_idx];

        let mut out = TraceOut::unobstructed();
        for &brush_idx in leaf.brushes_idx.iter() {
            let brush = &self.brushes[brush_idx as usize];

            if brush.sides.is_empty() {
                continue;
            }
            if !self.textures[brush.texture_idx as usize]
                .contents
                .contains(ContentsFlags::SOLID)
            {
                continue;
            }

            out = out.merge(self.clip_brush(brush, line));
        }
        out
    }

    /// Clip the original traced segment against one convex brush, tracking
    /// the latest entry and earliest exit across its side planes.
    fn clip_brush(&self, brush: &Brush, line: &TraceLine) -> TraceOut {
        let mut starts_out = false;
        let mut ends_out = false;
        let mut enter_fraction = -1.0f32;
        let mut exit_fraction = 1.0f32;
        let mut hit_plane = None;

        for side in brush.sides.iter() {
            let plane = &self.planes[side.plane_idx as usize];

            let start_dist = plane.distance_to(&line.start) - line.radius;
            let end_dist = plane.distance_to(&line.end) - line.radius;

            if start_dist > 0.0 {
                starts_out = true;
            }
            if end_dist > 0.0 {
                ends_out = true;
            }

            // both endpoints in front of one side: the brush can't be hit
            if start_dist > 0.0 && end_dist > 0.0 {
                return TraceOut::unobstructed();
            }
            // both behind this side: it doesn't constrain the segment
            if start_dist <= 0.0 && end_dist <= 0.0 {
                continue;
            }

            if start_dist > end_dist {
                // crossing into the brush through this side
                let frac = (start_dist - TRACE_EPSILON) / (start_dist - end_dist);
                if frac > enter_fraction {
                    enter_fraction = frac;
                    hit_plane = Some(*plane);
                }
            } else {
                // crossing out of the brush
                let frac = (start_dist + TRACE_EPSILON) / (start_dist - end_dist);
                if frac < exit_fraction {
                    exit_fraction = frac;
                }
            }
        }

        if !starts_out {
            // began inside this brush
            return TraceOut {
                fraction: 1.0,
                end: Vector3::zeros(),
                starts_out: false,
                all_solid: !ends_out,
                plane: None,
            };
        }

        if enter_fraction > -1.0 && enter_fraction < exit_fraction {
            return TraceOut {
                fraction: clamp01(enter_fraction),
                end: Vector3::zeros(),
                starts_out: true,
                all_solid: false,
                plane: hit_plane,
            };
        }

        TraceOut::unobstructed()
    }
}

fn clamp01(f: f32) -> f32 {
    f.max(0.0).min(1.0)
}

#[test]
fn merge_takes_the_closer_hit() {
    let near_plane = Plane {
        normal: Vector3::new(1.0, 0.0, 0.0),
        dist: 0.0,
    };
    let far_plane = Plane {
        normal: Vector3::new(0.0, 1.0, 0.0),
        dist: 0.0,
    };

    let near = TraceOut {
        fraction: 0.25,
        plane: Some(near_plane),
        ..TraceOut::unobstructed()
    };
    let far = TraceOut {
        fraction: 0.75,
        plane: Some(far_plane),
        ..TraceOut::unobstructed()
    };

    let merged = near.clone().merge(far.clone());
    assert_eq!(merged.fraction, 0.25);
    assert_eq!(merged.plane, Some(near_plane));

    // order independent
    let merged = far.merge(near);
    assert_eq!(merged.fraction, 0.25);
    assert_eq!(merged.plane, Some(near_plane));
}

#[test]
fn merge_accumulates_solidity_flags() {
    let inside = TraceOut {
        starts_out: false,
        all_solid: true,
        ..TraceOut::unobstructed()
    };

    let merged = TraceOut::unobstructed().merge(inside);
    assert!(!merged.starts_out);
    assert!(merged.all_solid);
}
