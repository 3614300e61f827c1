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

//! A complete BSP file

// Lump decoding lives in the sibling modules; this file stitches the decoded
// lumps together and owns the per-frame visible-face list.

use bitvec::prelude::*;
use log::debug;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

use super::header::{self, Header};
use super::*;
use crate::parts::{Brush, Effect, Entity, Face, Leaf, MeshVert, Model, Node, Plane, Texture, Vertex};
use crate::types::{LoadError, Result};

/// A parsed map file.
///
/// Everything except the visible-face list is immutable once loaded, and all
/// cross-lump indices have been validated, so the query methods (`leaf_at`,
/// `cluster_visible_from`, `trace`, ...) can be called freely from multiple
/// threads.
pub struct BspFile {
    pub(crate) entities: Box<[Entity]>,
    pub(crate) textures: Box<[Texture]>,
    pub(crate) planes: Box<[Plane]>,
    pub(crate) nodes: Box<[Node]>,
    pub(crate) leaves: Box<[Leaf]>,
    pub(crate) models: Box<[Model]>,
    pub(crate) brushes: Box<[Brush]>,
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) meshverts: Box<[MeshVert]>,
    pub(crate) effects: Box<[Effect]>,
    pub(crate) faces: Box<[Face]>,
    pub(crate) visdata: Box<[BitBox<Lsb0, u8>]>,

    /// Face indices to draw this frame, rebuilt by
    /// [`BspFile::rebuild_visible_faces`]. Single writer (the pre-render
    /// hook), many readers.
    pub(crate) visible_faces: RwLock<Vec<u32>>,

    version: i32,
}

impl BspFile {
    /// Parse `data` as a map file.
    pub fn from_bytes(data: &[u8]) -> Result<BspFile> {
        let header = Header::from(data)?;

        let entities = entities::from_data(header.get_lump(data, header::LUMP_ENTITIES)?)?;
        let textures = textures::from_data(header.get_lump(data, header::LUMP_TEXTURES)?)?;
        let planes = planes::from_data(header.get_lump(data, header::LUMP_PLANES)?)?;
        let vertices = vertices::verts_from_data(header.get_lump(data, header::LUMP_VERTICES)?)?;
        let meshverts =
            vertices::meshverts_from_data(header.get_lump(data, header::LUMP_MESHVERTS)?)?;
        let visdata = visdata::from_data(header.get_lump(data, header::LUMP_VISDATA)?)?;

        let brushes = brushes::from_data(
            header.get_lump(data, header::LUMP_BRUSHES)?,
            header.get_lump(data, header::LUMP_BRUSH_SIDES)?,
            textures.len() as u32,
            planes.len() as u32,
        )?;

        let effects = effects::from_data(
            header.get_lump(data, header::LUMP_EFFECTS)?,
            brushes.len() as u32,
        )?;

        let faces = faces::from_data(
            header.get_lump(data, header::LUMP_FACES)?,
            textures.len() as u32,
            effects.len() as u32,
            vertices.len() as u32,
            meshverts.len() as u32,
        )?;

        let (nodes, leaves) = tree::from_data(
            header.get_lump(data, header::LUMP_NODES)?,
            header.get_lump(data, header::LUMP_LEAVES)?,
            header.get_lump(data, header::LUMP_LEAF_FACES)?,
            header.get_lump(data, header::LUMP_LEAF_BRUSHES)?,
            planes.len() as u32,
            faces.len() as u32,
            brushes.len() as u32,
        )?;

        let models = models::from_data(
            header.get_lump(data, header::LUMP_MODELS)?,
            faces.len() as u32,
            brushes.len() as u32,
        )?;

        // leaf clusters index rows of the vis matrix
        if !visdata.is_empty() {
            for leaf in leaves.iter() {
                if leaf.cluster >= visdata.len() as i32 {
                    return Err(LoadError::MalformedMap("leaf references missing vis cluster"));
                }
            }
        }

        debug!(
            "loaded map: {} nodes, {} leaves, {} brushes, {} faces, {} entities, {} vis clusters",
            nodes.len(),
            leaves.len(),
            brushes.len(),
            faces.len(),
            entities.len(),
            visdata.len()
        );

        Ok(BspFile {
            entities,
            textures,
            planes,
            nodes,
            leaves,
            models,
            brushes,
            vertices,
            meshverts,
            effects,
            faces,
            visdata,
            visible_faces: RwLock::new(Vec::new()),
            version: header.version,
        })
    }

    /// Read and parse the map file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BspFile> {
        let data = std::fs::read(path)?;
        BspFile::from_bytes(&data)
    }

    /// Version number from the file header. Recorded, never interpreted.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn meshverts(&self) -> &[MeshVert] {
        &self.meshverts
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The face list built by the last [`BspFile::rebuild_visible_faces`]
    /// call. Hold the guard only for the duration of a draw submission.
    pub fn visible_faces(&self) -> RwLockReadGuard<'_, Vec<u32>> {
        self.visible_faces.read().unwrap_or_else(|e| e.into_inner())
    }
}
