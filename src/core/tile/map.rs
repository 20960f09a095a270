//=========================================================================
// Tile Map
//=========================================================================
//
// Fixed-size grid of packed tile cells, stored row-major.
//
// Reads outside the grid return the empty cell and writes outside the
// grid are dropped: edge-of-map rendering probes neighbours routinely and
// must never fail.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::ParseIntError;

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::cell::TileCell;
use super::error::{Result, TileError};

//=== TileMap =============================================================

/// Named `width × height` grid of [`TileCell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    name: String,
    width: u32,
    height: u32,
    cells: Vec<TileCell>,
}

impl TileMap {
    //--- Construction -----------------------------------------------------

    /// Creates a map filled with empty cells.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cells: vec![TileCell::EMPTY; width as usize * height as usize],
        }
    }

    /// Creates a map from cells in reading order (left to right, top to
    /// bottom).
    ///
    /// # Errors
    ///
    /// [`TileError::CellCount`] if `cells.len() != width * height`.
    pub fn from_cells(
        name: impl Into<String>,
        width: u32,
        height: u32,
        cells: Vec<TileCell>,
    ) -> Result<Self> {
        let name = name.into();
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(TileError::CellCount {
                map: name,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { name, width, height, cells })
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map size in tiles.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// All cells in reading order.
    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileCell]> {
        // chunks() rejects 0; an empty map simply has no rows
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Cell at `(x, y)`, or the empty cell when out of range.
    pub fn tile(&self, x: i32, y: i32) -> TileCell {
        self.offset(x, y)
            .map(|i| self.cells[i])
            .unwrap_or(TileCell::EMPTY)
    }

    /// Tile-set index at `(x, y)`, or 0 when out of range.
    pub fn tile_index(&self, x: i32, y: i32) -> u32 {
        self.tile(x, y).index()
    }

    //--- Editing ----------------------------------------------------------

    /// Stores `cell` at `(x, y)`. Returns `false` (and changes nothing)
    /// when the coordinates are out of range.
    pub fn set_tile(&mut self, x: i32, y: i32, cell: TileCell) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => {
                trace!("Ignoring write outside map {:?} at ({}, {})", self.name, x, y);
                false
            }
        }
    }

    /// Replaces only the index at `(x, y)`, keeping flip/rotation flags.
    pub fn set_tile_index(&mut self, x: i32, y: i32, index: u32) -> bool {
        let cell = self.tile(x, y).with_index(index);
        self.set_tile(x, y, cell)
    }

    /// Applies `edit` to the cell at `(x, y)` if it exists.
    pub fn update_tile(&mut self, x: i32, y: i32, edit: impl FnOnce(TileCell) -> TileCell) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.cells[i] = edit(self.cells[i]);
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, cell: TileCell) {
        self.cells.fill(cell);
    }

    //--- Text Form --------------------------------------------------------

    /// Raw cell values in reading order, comma separated.
    pub fn to_csv(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.raw().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses the output of [`to_csv`](Self::to_csv). Blank text is an
    /// empty list; whitespace around values is ignored.
    pub fn parse_cells(text: &str) -> std::result::Result<Vec<TileCell>, ParseIntError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        text.split(',')
            .map(|value| value.trim().parse::<u32>().map(TileCell::from_raw))
            .collect()
    }

    //--- Internal Helpers -------------------------------------------------

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> TileMap {
        let cells = (0..width * height).map(TileCell::new).collect();
        TileMap::from_cells("numbered", width, height, cells).unwrap()
    }

    #[test]
    fn new_map_is_empty() {
        let map = TileMap::new("blank", 3, 2);
        assert_eq!(map.cells().len(), 6);
        assert!(map.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn cells_are_row_major() {
        let map = numbered(4, 3);
        assert_eq!(map.tile_index(0, 0), 0);
        assert_eq!(map.tile_index(3, 0), 3);
        assert_eq!(map.tile_index(0, 1), 4);
        assert_eq!(map.tile_index(3, 2), 11);
    }

    #[test]
    fn out_of_range_reads_return_zero() {
        let map = numbered(4, 3);
        assert_eq!(map.tile_index(-1, 0), 0);
        assert_eq!(map.tile_index(4, 0), 0);
        assert_eq!(map.tile_index(0, -1), 0);
        assert_eq!(map.tile_index(0, 3), 0);
        assert_eq!(map.tile(i32::MIN, i32::MAX), TileCell::EMPTY);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut map = numbered(4, 3);
        let before = map.clone();

        assert!(!map.set_tile(-1, 0, TileCell::new(9)));
        assert!(!map.set_tile(4, 2, TileCell::new(9)));
        assert!(!map.set_tile_index(0, 3, 9));
        assert_eq!(map, before);
    }

    #[test]
    fn set_tile_index_keeps_flags() {
        let mut map = TileMap::new("m", 2, 2);
        map.set_tile(1, 1, TileCell::new(5).flipped_y());
        map.set_tile_index(1, 1, 8);

        let cell = map.tile(1, 1);
        assert_eq!(cell.index(), 8);
        assert!(cell.flip_y());
    }

    #[test]
    fn update_tile_applies_edit() {
        let mut map = numbered(2, 2);
        assert!(map.update_tile(1, 0, TileCell::flipped_x));
        assert!(map.tile(1, 0).flip_x());
        assert!(!map.update_tile(2, 0, TileCell::flipped_x));
    }

    #[test]
    fn from_cells_rejects_wrong_count() {
        let err = TileMap::from_cells("bad", 2, 2, vec![TileCell::EMPTY; 3]).unwrap_err();
        assert!(matches!(err, TileError::CellCount { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn rows_split_by_width() {
        let map = numbered(4, 3);
        let rows: Vec<_> = map.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0].index(), 4);
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut map = numbered(3, 3);
        map.fill(TileCell::new(2));
        assert!(map.cells().iter().all(|c| c.index() == 2));
    }

    #[test]
    fn csv_keeps_flag_bits() {
        let mut map = numbered(2, 1);
        map.update_tile(1, 0, |c| c.flipped_y().rotated_cw());

        let text = map.to_csv();
        assert_eq!(text, format!("0,{}", map.tile(1, 0).raw()));
        assert_eq!(TileMap::parse_cells(&text).unwrap(), map.cells());
    }

    #[test]
    fn parse_cells_handles_blank_and_bad_input() {
        assert!(TileMap::parse_cells("  ").unwrap().is_empty());
        assert_eq!(TileMap::parse_cells(" 1 ,\n 2").unwrap(), vec![TileCell::new(1), TileCell::new(2)]);
        assert!(TileMap::parse_cells("1,,2").is_err());
        assert!(TileMap::parse_cells("1,x").is_err());
    }
}
