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

//! The record types a decoded map is made of

pub mod brushes;
pub mod effects;
pub mod entities;
pub mod faces;
pub mod models;
pub mod planes;
pub mod textures;
pub mod tree;
pub mod vertices;
pub mod visdata;

pub use self::brushes::{Brush, BrushSide};
pub use self::effects::Effect;
pub use self::entities::Entity;
pub use self::faces::{Face, FaceType};
pub use self::models::Model;
pub use self::planes::Plane;
pub use self::textures::{ContentsFlags, SurfaceFlags, Texture};
pub use self::tree::{ChildRef, Leaf, Node};
pub use self::vertices::{MeshVert, TexCoord, Vertex};
pub use self::visdata::ClusterId;
