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

//! Loads quake-style binary level files and answers spatial queries over them.
//!
//! A level file is a header plus 17 fixed-layout lumps. [`BspFile`] decodes
//! and validates all of them up front; after that the map is immutable and
//! three query surfaces are exposed:
//!
//!   - [`BspFile::leaf_at`] classifies a world position into a tree leaf
//!   - [`BspFile::cluster_visible_from`] and
//!     [`BspFile::rebuild_visible_faces`] implement PVS-based culling
//!   - [`BspFile::trace`] sweeps a point or sphere through the level's
//!     brush geometry
//!
//! All cross-lump indices are checked once at load time, so queries never
//! touch out-of-range data.

extern crate nalgebra as na;

pub mod helpers;
pub mod parts;
pub mod q3;
pub mod query;
pub mod types;

pub use q3::file::BspFile;
pub use query::trace::TraceOut;
pub use query::FrustumTest;
pub use types::{LoadError, Result};
