//=========================================================================
// Level Writer
//=========================================================================
//
// ProjectFile → XML, in the shape `reader` expects. Floats use Rust's
// shortest round-trip formatting so reading back yields identical values.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

//=== Internal Dependencies ===============================================

use super::error::Result;
use super::project::{EditorInfo, LayerDef, ProjectFile};
use super::xml::{format_argb, format_vec2};
use super::{NO_TARGET, ROOT_ELEMENT};
use crate::core::tile::{TileMap, TileSet};

type XmlWriter = Writer<Vec<u8>>;

//=== Public API ==========================================================

/// Serialises `project` to an indented XML document. Projects that
/// would not read back identically are rejected before writing.
pub fn write_project(project: &ProjectFile) -> Result<String> {
    project.validate()?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    write_section(&mut writer, "TileSets", &project.tile_sets, write_tile_set)?;
    write_section(&mut writer, "TileMaps", &project.tile_maps, write_tile_map)?;
    write_section(&mut writer, "TileLayers", &project.layers, write_layer)?;
    write_editor_info(&mut writer, &project.editor)?;

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Writes `project` to `path`, replacing any existing file.
pub fn write_project_file(project: &ProjectFile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, write_project(project)?)?;
    info!("Saved level {}", path.display());
    Ok(())
}

//=== Element Writers =====================================================

fn write_section<T>(
    writer: &mut XmlWriter,
    name: &str,
    items: &[T],
    write_item: fn(&mut XmlWriter, &T) -> Result<()>,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for item in items {
        write_item(writer, item)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn element<'a>(name: &'a str, attributes: &'a [(&'a str, String)]) -> BytesStart<'a> {
    BytesStart::new(name).with_attributes(attributes.iter().map(|(key, value)| (*key, value.as_str())))
}

fn write_tile_set(writer: &mut XmlWriter, set: &TileSet) -> Result<()> {
    let attributes = [
        ("Name", set.name.clone()),
        ("Texture", set.texture.clone()),
        ("TileWidth", set.tile_width.to_string()),
        ("TileHeight", set.tile_height.to_string()),
    ];
    writer.write_event(Event::Empty(element("TileSet", &attributes)))?;
    Ok(())
}

fn write_tile_map(writer: &mut XmlWriter, map: &TileMap) -> Result<()> {
    let attributes = [
        ("Name", map.name().to_owned()),
        ("Width", map.width().to_string()),
        ("Height", map.height().to_string()),
    ];

    if map.cells().is_empty() {
        writer.write_event(Event::Empty(element("TileMap", &attributes)))?;
        return Ok(());
    }

    let cells = map.to_csv();
    writer.write_event(Event::Start(element("TileMap", &attributes)))?;
    writer.write_event(Event::Text(BytesText::new(&cells)))?;
    writer.write_event(Event::End(BytesEnd::new("TileMap")))?;
    Ok(())
}

fn write_layer(writer: &mut XmlWriter, layer: &LayerDef) -> Result<()> {
    let attributes = [
        ("Name", layer.name.clone()),
        ("Mode", layer.mode.to_string()),
        ("Target", layer.target.clone().unwrap_or_else(|| NO_TARGET.to_owned())),
        ("TileSet", layer.tile_set.clone()),
        ("TileMap", layer.tile_map.clone()),
        ("TintColor", format_argb(layer.tint)),
        ("PositionScale", format_vec2(layer.position_scale)),
        ("PositionOffset", format_vec2(layer.position_offset)),
        ("DisplayScale", layer.display_scale.to_string()),
    ];
    writer.write_event(Event::Empty(element("TileLayer", &attributes)))?;
    Ok(())
}

fn write_editor_info(writer: &mut XmlWriter, info: &EditorInfo) -> Result<()> {
    let attributes = [
        ("BackgroundColor", format_argb(info.background)),
        ("ViewScaleX", info.view_scale.x.to_string()),
        ("ViewScaleY", info.view_scale.y.to_string()),
    ];
    writer.write_event(Event::Empty(element("EditorInfo", &attributes)))?;
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
