//=========================================================================
// Session Resources
//=========================================================================
//
// Explicitly owned, read-only data shared by every state of a session.
//
// Built before the runtime starts (see `Engine::init`) and handed to
// states by reference through `StateContext` and `DrawFrame`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::draw::Color;

//=== MenuStyle ===========================================================

/// Layout and colours shared by all menus.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStyle {
    /// Top-left of the first item.
    pub origin: Vec2,
    /// Vertical distance between item baselines.
    pub line_height: f32,
    /// Hit box width of one item.
    pub item_width: f32,
    pub title_position: Vec2,
    pub title_scale: f32,
    /// Horizontal offset of items at `t = 1`.
    pub slide_distance: f32,
    /// Width of the bar drawn for slider items.
    pub slider_width: f32,
    pub text_color: Color,
    pub selected_color: Color,
    pub title_color: Color,
    /// Fill drawn behind popup menus.
    pub popup_backdrop: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            origin: Vec2::new(80.0, 160.0),
            line_height: 40.0,
            item_width: 360.0,
            title_position: Vec2::new(80.0, 80.0),
            title_scale: 1.25,
            slide_distance: 256.0,
            slider_width: 160.0,
            text_color: Color::WHITE,
            selected_color: Color::YELLOW,
            title_color: Color::rgba(192, 192, 192, 255),
            popup_backdrop: Color::rgba(0, 0, 0, 160),
        }
    }
}

//=== SessionResources ====================================================

/// Resources bundle for one game session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResources {
    /// Drawable area in pixels; also the view size for layer graphs.
    pub display_size: Vec2,
    /// Colour the renderer clears to before drawing states.
    pub clear_color: Color,
    pub menu: MenuStyle,
}

impl SessionResources {
    pub fn new(display_size: Vec2) -> Self {
        Self {
            display_size,
            ..Self::default()
        }
    }

    pub fn with_menu_style(mut self, menu: MenuStyle) -> Self {
        self.menu = menu;
        self
    }
}

impl Default for SessionResources {
    fn default() -> Self {
        Self {
            display_size: Vec2::new(800.0, 600.0),
            clear_color: Color::CORNFLOWER_BLUE,
            menu: MenuStyle::default(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
