//=========================================================================
// Level Errors
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::tile::{TileError, UnknownLayerMode};

//=== LevelError ==========================================================

/// Everything that can go wrong loading, validating or saving a level.
///
/// Loading fails on the first problem; no partially built level is ever
/// returned.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("level file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("level text is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected root element <{expected}>, found <{found}>")]
    WrongRoot { expected: &'static str, found: String },

    #[error("document ended inside <{0}>")]
    Truncated(String),

    #[error("<{parent}> has no <{element}> element")]
    MissingElement { parent: String, element: &'static str },

    #[error("<{element}> has no {attribute:?} attribute")]
    MissingAttribute { element: String, attribute: &'static str },

    #[error("<{element}> attribute {attribute:?} has invalid value {value:?}")]
    InvalidValue {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error(transparent)]
    UnknownMode(#[from] UnknownLayerMode),

    #[error("layer {layer:?} references unknown {kind} {name:?}")]
    UnknownReference {
        layer: String,
        kind: &'static str,
        name: String,
    },

    #[error("{kind} name {name:?} is used more than once")]
    DuplicateName { kind: &'static str, name: String },

    #[error(transparent)]
    Tile(#[from] TileError),
}

pub type Result<T> = std::result::Result<T, LevelError>;
