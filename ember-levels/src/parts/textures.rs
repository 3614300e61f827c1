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

use bitflags::bitflags;

/// A texture/material entry from the map file.
///
/// The name is a path for the render collaborator to resolve; this core only
/// consumes the flags (a brush is collidable iff its texture has
/// [`ContentsFlags::SOLID`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub surface: SurfaceFlags,
    pub contents: ContentsFlags,
}

bitflags!(
    /// Per-surface behaviour flags.
    /// Values match the original id tech 3 surfaceflags.h.
    pub struct SurfaceFlags: u32 {
        /// never give falling damage
        const NO_DAMAGE = 0x1;

        /// affects game physics
        const SLICK = 0x2;

        /// lighting from environment map
        const SKY = 0x4;

        /// function as a ladder
        const LADDER = 0x8;

        /// don't make missile explosions
        const NO_IMPACT = 0x10;

        /// don't leave missile marks
        const NO_MARKS = 0x20;

        /// don't generate a drawsurface at all
        const NODRAW = 0x80;

        /// make a primary bsp splitter
        const HINT = 0x01_00;

        /// completely ignore, allowing non-closed brushes
        const SKIP = 0x02_00;

        /// don't collide against curves with this set
        const NON_SOLID = 0x40_00;

        /// clanking footsteps
        const METAL_STEPS = 0x10_00;

        /// leave a dust trail when walking on this surface
        const DUST = 0x04_00_00;
    }
);

bitflags!(
    /// Content classification for the volume behind a brush.
    /// Values match the original id tech 3 surfaceflags.h.
    pub struct ContentsFlags: u32 {
        /// blocks movement; the tracer only clips against brushes with this set
        const SOLID = 0x1;
        const LAVA = 0x8;
        const SLIME = 0x10;
        const WATER = 0x20;
        const FOG = 0x40;

        const AREA_PORTAL = 0x80_00;

        const PLAYER_CLIP = 0x01_00_00;
        const MONSTER_CLIP = 0x02_00_00;

        const TELEPORTER = 0x04_00_00;
        const JUMP_PAD = 0x08_00_00;
        const CLUSTER_PORTAL = 0x10_00_00;
        const DO_NOT_ENTER = 0x20_00_00;

        /// brush not used for the bsp
        const DETAIL = 0x08_00_00_00;

        /// brushes used for the bsp
        const STRUCTURAL = 0x10_00_00_00;

        /// don't consume surface fragments inside
        const TRANSLUCENT = 0x20_00_00_00;

        const TRIGGER = 0x40_00_00_00;

        /// don't leave bodies or items (death fog, lava)
        const NODROP = 0x80_00_00_00;
    }
);
