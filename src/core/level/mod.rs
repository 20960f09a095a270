//=========================================================================
// Levels
//=========================================================================
//
// Map editor project files and their runtime form.
//
// Architecture:
//   XML text ──reader──► ProjectFile ──build_graph()──► Level
//            ◄─writer──               (validated LayerGraph + maps)
//
//=========================================================================

//=== Module Declarations =================================================

mod error;
#[allow(clippy::module_inception)]
mod level;
mod project;
mod reader;
mod writer;
mod xml;

//=== Public API ==========================================================

pub use error::{LevelError, Result};
pub use level::Level;
pub use project::{EditorInfo, LayerDef, ProjectFile};
pub use reader::{parse_project, read_project_file};
pub use writer::{write_project, write_project_file};

//=== File Format Constants ===============================================

/// Root element of a project document.
pub const ROOT_ELEMENT: &str = "ICXNAMapEditorProjectFile";

/// `Target` value of a layer without a target.
pub const NO_TARGET: &str = "None";
