//=========================================================================
// Tile Cell
//=========================================================================
//
// Bit-packed tile value stored in every map cell.
//
// Layout (matches the level file format bit for bit):
// ```text
//   31  30 29  28   27   26 ............................ 0
//  ┌───┬─────┬────┬────┬──────────────────────────────────┐
//  │ R │ rot │ fy │ fx │            tile index            │
//  └───┴─────┴────┴────┴──────────────────────────────────┘
//   R = reserved (preserved, never interpreted)
// ```
//
//=========================================================================

//=== Bit Layout ==========================================================

/// Mask selecting the tile-set index (bits 0-26).
pub const INDEX_MASK: u32 = 0x07FF_FFFF;

/// Horizontal flip flag (bit 27).
pub const FLIP_X_BIT: u32 = 1 << 27;

/// Vertical flip flag (bit 28).
pub const FLIP_Y_BIT: u32 = 1 << 28;

const ROTATION_SHIFT: u32 = 29;
const ROTATION_MASK: u32 = 0b11 << ROTATION_SHIFT;

//=== Rotation ============================================================

/// Quarter-turn rotation encoded in bits 29-30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Decodes the two rotation bits.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::None,
            1 => Self::Cw90,
            2 => Self::Cw180,
            _ => Self::Cw270,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 1,
            Self::Cw180 => 2,
            Self::Cw270 => 3,
        }
    }

    /// Rotation in degrees, clockwise.
    pub const fn degrees(self) -> u32 {
        self.bits() * 90
    }

    /// Next quarter turn clockwise (270 wraps to 0).
    pub const fn clockwise(self) -> Self {
        Self::from_bits(self.bits() + 1)
    }
}

//=== TileCell ============================================================

/// One packed map cell: tile index plus flip and rotation flags.
///
/// The empty cell is `TileCell(0)`, which is also what out-of-range map
/// reads return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCell(u32);

impl TileCell {
    pub const EMPTY: Self = Self(0);

    /// Wraps a raw value exactly as stored on disk.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Builds an unflipped, unrotated cell. Indices wider than 27 bits are
    /// truncated.
    pub const fn new(index: u32) -> Self {
        Self(index & INDEX_MASK)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    pub const fn flip_x(self) -> bool {
        self.0 & FLIP_X_BIT != 0
    }

    pub const fn flip_y(self) -> bool {
        self.0 & FLIP_Y_BIT != 0
    }

    pub const fn rotation(self) -> Rotation {
        Rotation::from_bits((self.0 & ROTATION_MASK) >> ROTATION_SHIFT)
    }

    pub const fn is_empty(self) -> bool {
        self.index() == 0
    }

    //--- Editing ----------------------------------------------------------

    /// Replaces the index, keeping every flag.
    pub const fn with_index(self, index: u32) -> Self {
        Self((self.0 & !INDEX_MASK) | (index & INDEX_MASK))
    }

    /// Toggles horizontal flip. Applying it twice yields the original cell.
    pub const fn flipped_x(self) -> Self {
        Self(self.0 ^ FLIP_X_BIT)
    }

    /// Toggles vertical flip.
    pub const fn flipped_y(self) -> Self {
        Self(self.0 ^ FLIP_Y_BIT)
    }

    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self((self.0 & !ROTATION_MASK) | (rotation.bits() << ROTATION_SHIFT))
    }

    /// Rotates a further quarter turn clockwise.
    pub const fn rotated_cw(self) -> Self {
        self.with_rotation(self.rotation().clockwise())
    }
}

impl From<u32> for TileCell {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<TileCell> for u32 {
    fn from(cell: TileCell) -> Self {
        cell.raw()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
