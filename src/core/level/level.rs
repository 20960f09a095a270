//=========================================================================
// Level
//=========================================================================
//
// Runtime form of a project file: the tile data plus a validated layer
// graph, scrolled by moving the master layer each frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use glam::Vec2;
use log::info;

//=== Internal Dependencies ===============================================

use super::error::Result;
use super::project::ProjectFile;
use super::reader::read_project_file;
use crate::core::draw::{Color, DrawCommand, DrawList};
use crate::core::tile::{LayerGraph, TileMap, TileSet};

//=== Level ===============================================================

#[derive(Debug, Clone)]
pub struct Level {
    tile_sets: Vec<TileSet>,
    maps: Vec<TileMap>,
    graph: LayerGraph,
    background: Color,
}

impl Level {
    //--- Construction -----------------------------------------------------

    /// Validates `project` and builds its layer graph.
    pub fn from_project(project: &ProjectFile) -> Result<Self> {
        let graph = project.build_graph()?;
        Ok(Self {
            tile_sets: project.tile_sets.clone(),
            maps: project.tile_maps.clone(),
            graph,
            background: project.editor.background,
        })
    }

    /// Reads and validates a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let level = Self::from_project(&read_project_file(path)?)?;
        info!(
            "Loaded level {} ({} layers, {} maps)",
            path.display(),
            level.graph.len(),
            level.maps.len()
        );
        Ok(level)
    }

    //--- Queries ----------------------------------------------------------

    pub fn graph(&self) -> &LayerGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut LayerGraph {
        &mut self.graph
    }

    pub fn map(&self, name: &str) -> Option<&TileMap> {
        self.maps.iter().find(|m| m.name() == name)
    }

    /// Maps stay editable at runtime (destructible terrain, pickups).
    pub fn map_mut(&mut self, name: &str) -> Option<&mut TileMap> {
        self.maps.iter_mut().find(|m| m.name() == name)
    }

    pub fn tile_set(&self, name: &str) -> Option<&TileSet> {
        self.tile_sets.iter().find(|s| s.name == name)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    //--- Per-frame --------------------------------------------------------

    /// Moves the master layer to `position` and repositions every other
    /// layer from it.
    pub fn scroll_to(&mut self, position: Vec2, view: Vec2) -> Result<()> {
        self.graph.set_master_position(position, view)?;
        self.graph.resolve(view)?;
        Ok(())
    }

    /// Appends one tile window per layer, bottom layer first.
    pub fn draw(&self, view: Vec2, out: &mut DrawList) {
        for layer in self.graph.layers() {
            let window = layer.tile_window(view);
            let cells = self.map(layer.map()).map(|map| window.cells(map)).unwrap_or_default();
            out.push(DrawCommand::TileLayer {
                layer: layer.name().to_owned(),
                map: layer.map().to_owned(),
                tile_set: layer.tile_set().to_owned(),
                window,
                cells,
                tint: layer.tint,
            });
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
