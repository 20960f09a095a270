//=========================================================================
// Draw List
//=========================================================================
//
// Renderer-neutral output of one frame's draw pass.
//
// The state stack walks its visible states bottom-to-top and each state
// appends commands here. The host renderer (external) consumes the list;
// nothing in this crate touches textures or fonts.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::tile::{TileCell, TileWindow};

//=== Color ===============================================================

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const YELLOW: Self = Self::rgba(255, 255, 0, 255);
    pub const CORNFLOWER_BLUE: Self = Self::rgba(100, 149, 237, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a colour from the A,R,G,B component order used by level files.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies every channel by `alpha` (premultiplied fade).
    pub fn faded(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * alpha).round() as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in screen pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.position + self.size;
        point.x >= self.position.x && point.y >= self.position.y && point.x < max.x && point.y < max.y
    }
}

//=== DrawCommand =========================================================

/// One primitive for the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle (backdrops, fades, slider bars).
    Fill { rect: Rect, color: Color },

    /// A line of UI text. `bounds` is the laid-out hit box.
    Text { text: String, bounds: Rect, color: Color, scale: f32 },

    /// A window of tiles from one layer, positioned on screen.
    ///
    /// `cells` holds `window.columns × window.rows` cells in reading order,
    /// flip and rotation bits included. Off-map cells are empty.
    TileLayer {
        layer: String,
        map: String,
        tile_set: String,
        window: TileWindow,
        cells: Vec<TileCell>,
        tint: Color,
    },
}

//=== DrawList ============================================================

/// Commands collected during one draw pass, in paint order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Fill { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, bounds: Rect, color: Color, scale: f32) {
        self.push(DrawCommand::Text {
            text: text.into(),
            bounds,
            color,
            scale,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clears the list, keeping its allocation for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_reorders_components() {
        assert_eq!(Color::argb(10, 20, 30, 40), Color::rgba(20, 30, 40, 10));
    }

    #[test]
    fn faded_scales_all_channels() {
        let half = Color::WHITE.faded(0.5);
        assert_eq!(half, Color::rgba(128, 128, 128, 128));
        assert_eq!(Color::WHITE.faded(0.0), Color::TRANSPARENT);
        assert_eq!(Color::WHITE.faded(2.0), Color::WHITE);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(15.0, 12.0)));
    }

    #[test]
    fn draw_list_keeps_paint_order() {
        let mut list = DrawList::new();
        list.fill(Rect::default(), Color::BLACK);
        list.text("Play", Rect::default(), Color::WHITE, 1.0);

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::Fill { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Text { .. }));

        list.clear();
        assert!(list.is_empty());
    }
}
