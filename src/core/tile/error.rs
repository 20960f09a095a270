//! Errors raised by tile maps and the layer graph.

use thiserror::Error;

/// Errors surfaced while building or resolving tile layers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    #[error("map {map:?} needs {expected} cells, got {actual}")]
    CellCount {
        map: String,
        expected: usize,
        actual: usize,
    },

    #[error("layer {0:?} is already defined")]
    DuplicateLayer(String),

    #[error("unknown layer {0:?}")]
    UnknownLayer(String),

    #[error("no master layer has been designated")]
    NoMaster,

    #[error("layer target cycle: {}", .0.join(" -> "))]
    TargetCycle(Vec<String>),

    #[error("layers never resolved (cycle or missing target): {}", .0.join(", "))]
    Unresolved(Vec<String>),
}

pub type Result<T> = std::result::Result<T, TileError>;
