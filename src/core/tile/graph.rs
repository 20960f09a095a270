//=========================================================================
// Layer Graph
//=========================================================================
//
// Owns every tile layer of a level and propagates the master layer's
// position through the target edges once per frame.
//
// Resolution is a fixed-point sweep tolerant of declaration order:
// ```text
//   master ──► resolved
//   repeat:
//     for each unresolved layer
//       Forced or no target ─────────► resolve on its own
//       target already resolved ─────► derive from target, clamp
//   until everything resolved
//   (a sweep with no progress = cycle ─► Err(Unresolved))
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::error::{Result, TileError};
use super::layer::{Layer, LayerMode};

//=== LayerGraph ==========================================================

/// Named layers in draw order plus the target edges between them.
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    layers: Vec<Layer>,
    by_name: HashMap<String, usize>,
    master: Option<usize>,
}

impl LayerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Building ---------------------------------------------------------

    /// Appends a layer (drawn above all existing ones) and returns its index.
    pub fn add_layer(&mut self, layer: Layer) -> Result<usize> {
        if self.by_name.contains_key(layer.name()) {
            return Err(TileError::DuplicateLayer(layer.name().to_owned()));
        }
        let index = self.layers.len();
        debug!("Adding layer {:?} ({}) at index {}", layer.name(), layer.mode, index);
        self.by_name.insert(layer.name().to_owned(), index);
        self.layers.push(layer);
        Ok(index)
    }

    /// Points `layer` at `target` (or detaches it with `None`).
    ///
    /// Cycles are not rejected here so that edges can be wired in any
    /// order; [`find_cycle`](Self::find_cycle) and [`resolve`](Self::resolve)
    /// report them.
    pub fn set_target(&mut self, layer: &str, target: Option<&str>) -> Result<()> {
        let index = self.index_of(layer)?;
        let target = target.map(|name| self.index_of(name)).transpose()?;
        self.layers[index].target = target;
        Ok(())
    }

    /// Designates the layer whose position is driven externally.
    pub fn set_master(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        debug!("Master layer is now {:?}", name);
        self.master = Some(index);
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in draw order (bottom first).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.by_name.get(name).map(|&i| &self.layers[i])
    }

    /// Mutable access for tweaking mode, scale, offset or tint at runtime.
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.by_name.get(name).map(|&i| &mut self.layers[i])
    }

    pub fn master(&self) -> Option<&Layer> {
        self.master.map(|i| &self.layers[i])
    }

    /// Name of the layer `name` targets, if any.
    pub fn target_of(&self, name: &str) -> Option<&str> {
        self.layer(name)
            .and_then(Layer::target)
            .map(|i| self.layers[i].name())
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TileError::UnknownLayer(name.to_owned()))
    }

    /// Returns the first target cycle found, as layer names in edge order.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        // 0 = unvisited, 1 = on current chain, 2 = known acyclic
        let mut state = vec![0u8; self.layers.len()];

        for start in 0..self.layers.len() {
            let mut chain: Vec<usize> = Vec::new();
            let mut cursor = Some(start);

            while let Some(i) = cursor {
                match state[i] {
                    2 => break,
                    1 => {
                        let from = chain.iter().position(|&c| c == i).unwrap_or(0);
                        let mut names: Vec<String> = chain[from..]
                            .iter()
                            .map(|&c| self.layers[c].name().to_owned())
                            .collect();
                        names.push(self.layers[i].name().to_owned());
                        return Some(names);
                    }
                    _ => {
                        state[i] = 1;
                        chain.push(i);
                        cursor = self.layers[i].target;
                    }
                }
            }

            for i in chain {
                state[i] = 2;
            }
        }

        None
    }

    //--- Per-frame --------------------------------------------------------

    /// Moves the master layer, clamped to its map for a `view`-sized window.
    pub fn set_master_position(&mut self, position: Vec2, view: Vec2) -> Result<()> {
        let master = self.master.ok_or(TileError::NoMaster)?;
        self.layers[master].place(position, view);
        Ok(())
    }

    /// Recomputes every non-master layer position from the master.
    ///
    /// # Errors
    ///
    /// - [`TileError::NoMaster`] when no master layer is set.
    /// - [`TileError::Unresolved`] when a sweep makes no progress, which
    ///   only happens for layers stuck behind a target cycle. Positions of
    ///   the layers that did resolve are already updated.
    pub fn resolve(&mut self, view: Vec2) -> Result<()> {
        let master = self.master.ok_or(TileError::NoMaster)?;

        for layer in &mut self.layers {
            layer.updated = false;
        }
        self.layers[master].updated = true;

        let mut remaining = self.layers.len() - 1;
        let mut sweeps = 0;

        while remaining > 0 {
            sweeps += 1;
            let mut progressed = false;

            for i in 0..self.layers.len() {
                let Some(position) = self.next_position(i, view) else {
                    continue;
                };
                let layer = &mut self.layers[i];
                layer.set_position(position);
                layer.updated = true;
                remaining -= 1;
                progressed = true;
            }

            if !progressed {
                let stuck: Vec<String> = self
                    .layers
                    .iter()
                    .filter(|l| !l.updated)
                    .map(|l| l.name().to_owned())
                    .collect();
                warn!("Layer resolution stalled after {} sweeps: {:?}", sweeps, stuck);
                return Err(TileError::Unresolved(stuck));
            }
        }

        trace!("Resolved {} layers in {} sweeps", self.layers.len(), sweeps);
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    /// New position for layer `i` if it can be resolved during this sweep.
    fn next_position(&self, i: usize, view: Vec2) -> Option<Vec2> {
        let layer = &self.layers[i];
        if layer.updated {
            return None;
        }

        match (layer.mode, layer.target) {
            (LayerMode::Forced, _) | (_, None) => Some(layer.advance_alone()),
            (_, Some(t)) if self.layers[t].updated => Some(layer.derive_from(&self.layers[t], view)),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
