//=========================================================================
// Project File Model
//=========================================================================
//
// In-memory form of a map editor project: tile sets, tile maps, layer
// definitions and editor settings, exactly as stored on disk.
//
// Layer definitions refer to everything by name; `build_graph()` resolves
// the names and checks the structure before anything reaches the game.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::error::{LevelError, Result};
use super::NO_TARGET;
use crate::core::draw::Color;
use crate::core::tile::{Layer, LayerGraph, LayerMode, TileError, TileMap, TileSet};

//=== LayerDef ============================================================

/// Stored description of one tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDef {
    pub name: String,
    pub mode: LayerMode,
    /// Layer whose position this one derives from.
    pub target: Option<String>,
    pub tile_set: String,
    pub tile_map: String,
    pub tint: Color,
    pub position_scale: Vec2,
    pub position_offset: Vec2,
    pub display_scale: f32,
}

impl LayerDef {
    /// A static, untinted layer at scale 1.
    pub fn new(name: impl Into<String>, tile_set: impl Into<String>, tile_map: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: LayerMode::Static,
            target: None,
            tile_set: tile_set.into(),
            tile_map: tile_map.into(),
            tint: Color::WHITE,
            position_scale: Vec2::ONE,
            position_offset: Vec2::ZERO,
            display_scale: 1.0,
        }
    }

    pub fn with_mode(mut self, mode: LayerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    fn to_layer(&self, map: &TileMap, tile_set: &TileSet) -> Layer {
        Layer::new(self.name.clone(), map, tile_set)
            .with_mode(self.mode)
            .with_position_scale(self.position_scale)
            .with_position_offset(self.position_offset)
            .with_display_scale(self.display_scale)
            .with_tint(self.tint)
    }
}

//=== EditorInfo ==========================================================

/// Editor view settings. Stored and written back, unused by the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorInfo {
    pub background: Color,
    pub view_scale: Vec2,
}

impl Default for EditorInfo {
    fn default() -> Self {
        Self {
            background: Color::CORNFLOWER_BLUE,
            view_scale: Vec2::ONE,
        }
    }
}

//=== ProjectFile =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectFile {
    pub tile_sets: Vec<TileSet>,
    pub tile_maps: Vec<TileMap>,
    /// Layers in draw order (bottom first).
    pub layers: Vec<LayerDef>,
    pub editor: EditorInfo,
}

impl ProjectFile {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Lookup -----------------------------------------------------------

    pub fn tile_set(&self, name: &str) -> Option<&TileSet> {
        self.tile_sets.iter().find(|s| s.name == name)
    }

    pub fn tile_map(&self, name: &str) -> Option<&TileMap> {
        self.tile_maps.iter().find(|m| m.name() == name)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerDef> {
        self.layers.iter().find(|l| l.name == name)
    }

    //--- Validation -------------------------------------------------------

    /// Checks names, references and target cycles.
    pub fn validate(&self) -> Result<()> {
        self.build_graph().map(drop)
    }

    /// Builds the runtime layer graph, validating along the way.
    ///
    /// The master is the first layer that has no target and is not
    /// `Forced`; callers may pick another with `LayerGraph::set_master`.
    pub fn build_graph(&self) -> Result<LayerGraph> {
        unique("tile set", self.tile_sets.iter().map(|s| s.name.as_str()))?;
        unique("tile map", self.tile_maps.iter().map(TileMap::name))?;

        let mut graph = LayerGraph::new();
        for def in &self.layers {
            // Reserved: a target with this name reads back as "no target".
            if def.name == NO_TARGET {
                return Err(LevelError::InvalidValue {
                    element: format!("TileLayer {:?}", def.name),
                    attribute: "Name",
                    value: def.name.clone(),
                });
            }
            let tile_set = self
                .tile_set(&def.tile_set)
                .ok_or_else(|| unknown(def, "tile set", &def.tile_set))?;
            let map = self
                .tile_map(&def.tile_map)
                .ok_or_else(|| unknown(def, "tile map", &def.tile_map))?;

            graph.add_layer(def.to_layer(map, tile_set)).map_err(|err| match err {
                TileError::DuplicateLayer(name) => LevelError::DuplicateName { kind: "layer", name },
                other => other.into(),
            })?;
        }

        for def in &self.layers {
            if let Some(target) = &def.target {
                if graph.layer(target).is_none() {
                    return Err(unknown(def, "target layer", target));
                }
                graph.set_target(&def.name, Some(target))?;
            }
        }

        if let Some(cycle) = graph.find_cycle() {
            return Err(TileError::TargetCycle(cycle).into());
        }

        let master = self
            .layers
            .iter()
            .find(|def| def.target.is_none() && def.mode != LayerMode::Forced);
        if let Some(master) = master {
            graph.set_master(&master.name)?;
        }

        debug!("Built layer graph with {} layers", graph.len());
        Ok(graph)
    }
}

//=== Validation Helpers ==================================================

fn unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(LevelError::DuplicateName {
                kind,
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

fn unknown(def: &LayerDef, kind: &'static str, name: &str) -> LevelError {
    LevelError::UnknownReference {
        layer: def.name.clone(),
        kind,
        name: name.to_owned(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectFile {
        ProjectFile {
            tile_sets: vec![TileSet::new("ground", "tiles/ground", 16, 16)],
            tile_maps: vec![TileMap::new("main", 64, 32), TileMap::new("sky", 16, 8)],
            layers: vec![
                LayerDef::new("clouds", "ground", "sky").with_mode(LayerMode::Forced),
                LayerDef::new("world", "ground", "main"),
                LayerDef::new("backdrop", "ground", "sky")
                    .with_mode(LayerMode::Relative)
                    .with_target("world"),
            ],
            editor: EditorInfo::default(),
        }
    }

    #[test]
    fn builds_graph_with_targets_and_master() {
        let graph = project().build_graph().unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.target_of("backdrop"), Some("world"));
        assert_eq!(graph.master().map(Layer::name), Some("world"));
        assert_eq!(graph.layer("clouds").unwrap().mode, LayerMode::Forced);
    }

    #[test]
    fn rejects_unknown_references() {
        let mut bad = project();
        bad.layers[1].tile_map = "missing".into();
        assert!(matches!(
            bad.validate(),
            Err(LevelError::UnknownReference { kind: "tile map", .. })
        ));

        let mut bad = project();
        bad.layers[2].target = Some("nowhere".into());
        assert!(matches!(
            bad.validate(),
            Err(LevelError::UnknownReference { kind: "target layer", ref name, .. }) if name == "nowhere"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut bad = project();
        bad.layers.push(LayerDef::new("world", "ground", "main"));
        assert!(matches!(bad.validate(), Err(LevelError::DuplicateName { kind: "layer", .. })));

        let mut bad = project();
        bad.tile_maps.push(TileMap::new("sky", 1, 1));
        assert!(matches!(bad.validate(), Err(LevelError::DuplicateName { kind: "tile map", .. })));
    }

    #[test]
    fn rejects_layer_named_like_the_no_target_marker() {
        let mut bad = project();
        bad.layers.push(LayerDef::new(NO_TARGET, "ground", "main"));
        bad.layers.push(
            LayerDef::new("fg", "ground", "main")
                .with_mode(LayerMode::Follow)
                .with_target(NO_TARGET),
        );

        assert!(matches!(
            bad.validate(),
            Err(LevelError::InvalidValue { attribute: "Name", ref value, .. }) if value == NO_TARGET
        ));
    }

    #[test]
    fn rejects_target_cycles() {
        let mut bad = project();
        bad.layers[1].target = Some("backdrop".into());
        bad.layers[1].mode = LayerMode::Follow;

        assert!(matches!(
            bad.validate(),
            Err(LevelError::Tile(TileError::TargetCycle(_)))
        ));
    }

    #[test]
    fn lookup_by_name() {
        let project = project();
        assert_eq!(project.tile_set("ground").unwrap().tile_width, 16);
        assert_eq!(project.tile_map("sky").unwrap().width(), 16);
        assert!(project.layer("backdrop").unwrap().target.is_some());
        assert!(project.layer("nope").is_none());
    }
}
