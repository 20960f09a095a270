//=========================================================================
// Level Reader
//=========================================================================
//
// XML → ProjectFile.
//
// Document shape:
// ```text
//   <ICXNAMapEditorProjectFile>
//     <TileSets>   <TileSet Name Texture TileWidth TileHeight/>*
//     <TileMaps>   <TileMap Name Width Height>cell,cell,...</TileMap>*
//     <TileLayers> <TileLayer Name Mode Target TileSet TileMap TintColor
//                             PositionScale PositionOffset DisplayScale/>*
//     <EditorInfo BackgroundColor ViewScaleX ViewScaleY/>   (optional)
//   </ICXNAMapEditorProjectFile>
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::error::{LevelError, Result};
use super::project::{EditorInfo, LayerDef, ProjectFile};
use super::xml::Element;
use super::{NO_TARGET, ROOT_ELEMENT};
use crate::core::tile::{LayerMode, TileMap, TileSet};

//=== Public API ==========================================================

/// Parses and validates a project document.
pub fn parse_project(xml: &str) -> Result<ProjectFile> {
    let root = Element::parse_document(xml)?;
    if root.name != ROOT_ELEMENT {
        return Err(LevelError::WrongRoot {
            expected: ROOT_ELEMENT,
            found: root.name,
        });
    }

    let project = ProjectFile {
        tile_sets: root
            .child("TileSets")?
            .children_named("TileSet")
            .map(read_tile_set)
            .collect::<Result<_>>()?,
        tile_maps: root
            .child("TileMaps")?
            .children_named("TileMap")
            .map(read_tile_map)
            .collect::<Result<_>>()?,
        layers: root
            .child("TileLayers")?
            .children_named("TileLayer")
            .map(read_layer)
            .collect::<Result<_>>()?,
        editor: match root.optional_child("EditorInfo") {
            Some(info) => read_editor_info(info)?,
            None => EditorInfo::default(),
        },
    };

    project.validate()?;
    debug!(
        "Parsed project: {} tile sets, {} maps, {} layers",
        project.tile_sets.len(),
        project.tile_maps.len(),
        project.layers.len()
    );
    Ok(project)
}

/// Reads a project file from disk.
pub fn read_project_file(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let text = fs::read_to_string(path)?;
    parse_project(&text)
}

//=== Element Readers =====================================================

fn read_tile_set(element: &Element) -> Result<TileSet> {
    Ok(TileSet::new(
        element.attr("Name")?,
        element.attr("Texture")?,
        element.parse_attr("TileWidth")?,
        element.parse_attr("TileHeight")?,
    ))
}

fn read_tile_map(element: &Element) -> Result<TileMap> {
    let name = element.attr("Name")?;
    let width = element.parse_attr("Width")?;
    let height = element.parse_attr("Height")?;
    let cells = TileMap::parse_cells(&element.text).map_err(|_| LevelError::InvalidValue {
        element: format!("TileMap {:?}", name),
        attribute: "cells",
        value: element.text.clone(),
    })?;

    Ok(TileMap::from_cells(name, width, height, cells)?)
}

fn read_layer(element: &Element) -> Result<LayerDef> {
    let mode: LayerMode = element.attr("Mode")?.parse()?;
    let target = match element.attr("Target")? {
        NO_TARGET => None,
        name => Some(name.to_owned()),
    };

    Ok(LayerDef {
        name: element.attr("Name")?.to_owned(),
        mode,
        target,
        tile_set: element.attr("TileSet")?.to_owned(),
        tile_map: element.attr("TileMap")?.to_owned(),
        tint: element.parse_argb("TintColor")?,
        position_scale: element.parse_vec2("PositionScale")?,
        position_offset: element.parse_vec2("PositionOffset")?,
        display_scale: element.parse_attr("DisplayScale")?,
    })
}

fn read_editor_info(element: &Element) -> Result<EditorInfo> {
    Ok(EditorInfo {
        background: element.parse_argb("BackgroundColor")?,
        view_scale: Vec2::new(element.parse_attr("ViewScaleX")?, element.parse_attr("ViewScaleY")?),
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::TileError;

    fn document(layers: &str, map_body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<ICXNAMapEditorProjectFile>
  <TileSets>
    <TileSet Name="ground" Texture="tiles/ground" TileWidth="16" TileHeight="16" />
  </TileSets>
  <TileMaps>
    <TileMap Name="main" Width="2" Height="2">{}</TileMap>
  </TileMaps>
  <TileLayers>{}</TileLayers>
</ICXNAMapEditorProjectFile>"#,
            map_body, layers
        )
    }

    fn layer(name: &str, mode: &str, target: &str) -> String {
        format!(
            r#"<TileLayer Name="{}" Mode="{}" Target="{}" TileSet="ground" TileMap="main" TintColor="255,255,255,255" PositionScale="1,1" PositionOffset="0,0" DisplayScale="1" />"#,
            name, mode, target
        )
    }

    #[test]
    fn reads_minimal_project() {
        let layers = layer("world", "Static", "None") + &layer("fg", "Follow", "world");
        let project = parse_project(&document(&layers, "1,2,3,4")).unwrap();

        assert_eq!(project.tile_sets[0].tile_height, 16);
        assert_eq!(project.tile_maps[0].tile_index(1, 1), 4);
        assert_eq!(project.layers[1].target.as_deref(), Some("world"));
        assert_eq!(project.layers[0].target, None);
        assert_eq!(project.editor, EditorInfo::default());
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = parse_project(&document(&layer("world", "Wobbly", "None"), "0,0,0,0")).unwrap_err();
        assert!(matches!(err, LevelError::UnknownMode(ref m) if m.0 == "Wobbly"));
    }

    #[test]
    fn rejects_dangling_target() {
        let err = parse_project(&document(&layer("fg", "Follow", "ghost"), "0,0,0,0")).unwrap_err();
        assert!(matches!(err, LevelError::UnknownReference { kind: "target layer", .. }));
    }

    #[test]
    fn rejects_cycles() {
        let layers = layer("a", "Follow", "b") + &layer("b", "Follow", "a");
        let err = parse_project(&document(&layers, "0,0,0,0")).unwrap_err();
        assert!(matches!(err, LevelError::Tile(TileError::TargetCycle(_))));
    }

    #[test]
    fn rejects_size_mismatch() {
        let err = parse_project(&document(&layer("w", "Static", "None"), "1,2,3")).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Tile(TileError::CellCount { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn rejects_bad_cell_values() {
        let err = parse_project(&document(&layer("w", "Static", "None"), "1,two,3,4")).unwrap_err();
        assert!(matches!(err, LevelError::InvalidValue { attribute: "cells", .. }));
    }

    #[test]
    fn rejects_missing_attribute_and_node() {
        let broken = layer("w", "Static", "None").replace(r#" DisplayScale="1""#, "");
        let err = parse_project(&document(&broken, "0,0,0,0")).unwrap_err();
        assert!(matches!(err, LevelError::MissingAttribute { attribute: "DisplayScale", .. }));

        let err = parse_project("<ICXNAMapEditorProjectFile><TileSets/></ICXNAMapEditorProjectFile>").unwrap_err();
        assert!(matches!(err, LevelError::MissingElement { element: "TileMaps", .. }));
    }

    #[test]
    fn rejects_wrong_root_and_bad_xml() {
        assert!(matches!(
            parse_project("<Project/>"),
            Err(LevelError::WrongRoot { ref found, .. }) if found == "Project"
        ));
        assert!(parse_project("<ICXNAMapEditorProjectFile><TileSets>").is_err());
    }
}
