//! Tile-set descriptor: which texture the tiles come from and how big
//! each tile is. Texture loading itself belongs to the renderer.

use glam::Vec2;

/// Named tile atlas with a fixed pixel tile size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    pub name: String,
    /// Asset name handed to the content loader.
    pub texture: String,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileSet {
    pub fn new(
        name: impl Into<String>,
        texture: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
            tile_width,
            tile_height,
        }
    }

    /// Unscaled tile size in pixels.
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width as f32, self.tile_height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_as_vector() {
        let set = TileSet::new("ground", "tiles/ground", 16, 8);
        assert_eq!(set.tile_size(), Vec2::new(16.0, 8.0));
    }
}
