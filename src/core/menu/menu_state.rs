//=========================================================================
// Menu State
//=========================================================================
//
// A `GameState` that shows a vertical list of menu items.
//
// Input never calls back into game code directly. Each frame:
// ```text
//   handle_key() / handle_pointer() ──► Option<MenuCommand>
//                                             │
//   dispatch(command) ──► MenuAction table ──┼─► push / close / quit
//                                             └─► MenuMessage on the bus
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::item::{MenuItem, MenuValue};
use crate::core::draw::{Color, DrawList, Rect};
use crate::core::input::{KeyCode, MouseButton, StateTracker};
use crate::core::resources::MenuStyle;
use crate::core::state::{DrawFrame, GameState, Phase, StateContext, StateKey, Transition};

//=== Key Bindings ========================================================

const UP_KEYS: &[KeyCode] = &[KeyCode::ArrowUp, KeyCode::KeyW];
const DOWN_KEYS: &[KeyCode] = &[KeyCode::ArrowDown, KeyCode::KeyS];
const LEFT_KEYS: &[KeyCode] = &[KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::ArrowRight, KeyCode::KeyD];
const ACCEPT_KEYS: &[KeyCode] = &[KeyCode::Enter, KeyCode::Space];
const CANCEL_KEYS: &[KeyCode] = &[KeyCode::Escape];

//=== MenuCommand =========================================================

/// What the player did to the menu this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCommand {
    Activated(usize),
    Changed { index: usize, value: MenuValue },
    Cancelled,
}

/// A [`MenuCommand`] published on the message bus, tagged with the menu
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuMessage<K: StateKey> {
    pub menu: K,
    pub command: MenuCommand,
}

//=== MenuAction ==========================================================

/// Builds the state opened by [`MenuAction::Open`].
pub type StateFactory<K> = fn() -> Box<dyn GameState<K>>;

/// Entry of a menu's dispatch table.
pub enum MenuAction<K: StateKey> {
    /// Push a new state built by the factory.
    Open(K, StateFactory<K>),
    /// Close this menu.
    Close,
    /// Stop the game.
    Quit,
    /// Post a [`MenuMessage`] for game code to read.
    Publish,
}

impl<K: StateKey> Clone for MenuAction<K> {
    fn clone(&self) -> Self {
        match self {
            Self::Open(key, factory) => Self::Open(*key, *factory),
            Self::Close => Self::Close,
            Self::Quit => Self::Quit,
            Self::Publish => Self::Publish,
        }
    }
}

impl<K: StateKey> std::fmt::Debug for MenuAction<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(key, _) => f.debug_tuple("Open").field(key).finish(),
            Self::Close => f.write_str("Close"),
            Self::Quit => f.write_str("Quit"),
            Self::Publish => f.write_str("Publish"),
        }
    }
}

//=== MenuState ===========================================================

struct MenuEntry<K: StateKey> {
    item: MenuItem,
    action: MenuAction<K>,
}

/// Menu screen or popup.
///
/// ```rust
/// # use jamkit::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Title, Gameplay }
/// # impl StateKey for Screen {}
/// # struct Gameplay;
/// # impl GameState<Screen> for Gameplay {}
/// let title = MenuState::new("Main Menu")
///     .with_item(MenuItem::button("Play"), MenuAction::Open(Screen::Gameplay, || Box::new(Gameplay)))
///     .with_item(MenuItem::slider("Volume", 0.5, 0.0, 1.0, 0.1), MenuAction::Publish)
///     .with_item(MenuItem::button("Quit"), MenuAction::Quit)
///     .on_cancel(MenuAction::Quit);
/// # let _: MenuState<Screen> = title;
/// ```
pub struct MenuState<K: StateKey> {
    title: String,
    entries: Vec<MenuEntry<K>>,
    selected: Option<usize>,
    cancel: MenuAction<K>,
    popup: bool,
    // Horizontal slide of the last update, for pointer hit tests.
    slide_offset: f32,
}

impl<K: StateKey> MenuState<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            selected: None,
            cancel: MenuAction::Close,
            popup: false,
            slide_offset: 0.0,
        }
    }

    /// Appends an item and the action run when it is activated.
    pub fn with_item(mut self, item: MenuItem, action: MenuAction<K>) -> Self {
        self.entries.push(MenuEntry { item, action });
        if self.selected.is_none() {
            self.selected = self.first_selectable();
        }
        self
    }

    /// Appends a non-selectable line.
    pub fn with_text(self, label: impl Into<String>) -> Self {
        self.with_item(MenuItem::text(label), MenuAction::Publish)
    }

    /// Action run on Escape (defaults to `Close`).
    pub fn on_cancel(mut self, action: MenuAction<K>) -> Self {
        self.cancel = action;
        self
    }

    /// Shows the menu over the state beneath it instead of covering it.
    pub fn popup(mut self) -> Self {
        self.popup = true;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().map(|e| &e.item)
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.entries.get(index).map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects `index` if it names a selectable item.
    pub fn select(&mut self, index: usize) -> bool {
        match self.entries.get(index) {
            Some(entry) if entry.item.is_selectable() => {
                self.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    //--- Input ------------------------------------------------------------

    /// Interprets this frame's key presses.
    ///
    /// Up/Down move the selection (skipping text lines, wrapping at the
    /// ends) and yield no command.
    pub fn handle_key(&mut self, input: &StateTracker) -> Option<MenuCommand> {
        if input.any_key_pressed(CANCEL_KEYS) {
            return Some(MenuCommand::Cancelled);
        }

        let index = self.selected?;

        if input.any_key_pressed(ACCEPT_KEYS) {
            return Some(MenuCommand::Activated(index));
        }

        let direction = match (input.any_key_pressed(LEFT_KEYS), input.any_key_pressed(RIGHT_KEYS)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        if direction != 0 {
            if let Some(value) = self.entries[index].item.adjust(direction) {
                return Some(MenuCommand::Changed { index, value });
            }
        }

        if input.any_key_pressed(UP_KEYS) {
            self.move_selection(-1);
        } else if input.any_key_pressed(DOWN_KEYS) {
            self.move_selection(1);
        }
        None
    }

    /// Hover selects, left click activates.
    pub fn handle_pointer(&mut self, input: &StateTracker, style: &MenuStyle) -> Option<MenuCommand> {
        let hovered = self.item_at(input.mouse_position(), style)?;

        if input.mouse_delta() != Vec2::ZERO {
            self.selected = Some(hovered);
        }
        if input.is_button_pressed(MouseButton::Left) {
            self.selected = Some(hovered);
            return Some(MenuCommand::Activated(hovered));
        }
        None
    }

    /// Runs the table entry for `command`.
    pub fn dispatch(&mut self, command: MenuCommand, ctx: &mut StateContext<'_, K>) {
        let action = match command {
            MenuCommand::Activated(index) => match self.entries.get(index) {
                Some(entry) => entry.action.clone(),
                None => return,
            },
            MenuCommand::Changed { .. } => MenuAction::Publish,
            MenuCommand::Cancelled => self.cancel.clone(),
        };

        debug!("Menu {:?}: {:?} -> {:?}", ctx.key(), command, action);

        match action {
            MenuAction::Open(key, factory) => ctx.push_boxed(key, factory()),
            MenuAction::Close => ctx.close_self(),
            MenuAction::Quit => ctx.quit(),
            MenuAction::Publish => {
                let menu = ctx.key();
                ctx.messages().push(MenuMessage { menu, command });
            }
        }
    }

    //--- Layout -----------------------------------------------------------

    /// Horizontal slide for a transition: in from the left, out to the right.
    pub fn slide_offset(transition: &Transition, style: &MenuStyle) -> f32 {
        let t = transition.progress();
        let offset = t * t * style.slide_distance;
        match transition.phase() {
            Phase::TransitionOn => -offset,
            _ => offset,
        }
    }

    /// Hit box of item `index` at the given slide offset.
    pub fn item_bounds(&self, index: usize, style: &MenuStyle, slide_offset: f32) -> Rect {
        let position = style.origin + Vec2::new(slide_offset, index as f32 * style.line_height);
        Rect::new(position, Vec2::new(style.item_width, style.line_height))
    }

    /// Hit boxes of all items at the given slide offset.
    pub fn layout(&self, style: &MenuStyle, slide_offset: f32) -> Vec<Rect> {
        (0..self.entries.len())
            .map(|i| self.item_bounds(i, style, slide_offset))
            .collect()
    }

    //--- Internal Helpers -------------------------------------------------

    fn first_selectable(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.item.is_selectable())
    }

    fn move_selection(&mut self, direction: i32) {
        let Some(current) = self.selected else {
            return;
        };
        let len = self.entries.len() as i64;

        for step in 1..=len {
            let candidate = (current as i64 + step * direction as i64).rem_euclid(len) as usize;
            if self.entries[candidate].item.is_selectable() {
                self.selected = Some(candidate);
                return;
            }
        }
    }

    fn item_at(&self, point: Vec2, style: &MenuStyle) -> Option<usize> {
        (0..self.entries.len()).find(|&i| {
            self.entries[i].item.is_selectable() && self.item_bounds(i, style, self.slide_offset).contains(point)
        })
    }
}

//=== GameState Implementation ============================================

impl<K: StateKey> GameState<K> for MenuState<K> {
    fn update(&mut self, ctx: &mut StateContext<'_, K>, transition: &Transition) {
        self.slide_offset = Self::slide_offset(transition, &ctx.resources().menu);
    }

    fn handle_input(&mut self, ctx: &mut StateContext<'_, K>) {
        let command = self
            .handle_key(ctx.input())
            .or_else(|| self.handle_pointer(ctx.input(), &ctx.resources().menu));

        if let Some(command) = command {
            self.dispatch(command, ctx);
        }
    }

    fn draw(&self, frame: &DrawFrame<'_>, out: &mut DrawList) {
        let style = &frame.resources.menu;
        let alpha = frame.transition.alpha();
        let offset = Self::slide_offset(frame.transition, style);

        if self.popup {
            out.fill(
                Rect::new(Vec2::ZERO, frame.resources.display_size),
                style.popup_backdrop.faded(alpha),
            );
        }

        let title_bounds = Rect::new(
            style.title_position + Vec2::new(offset, 0.0),
            Vec2::new(style.item_width, style.line_height * style.title_scale),
        );
        out.text(self.title.as_str(), title_bounds, style.title_color.faded(alpha), style.title_scale);

        for (index, entry) in self.entries.iter().enumerate() {
            let bounds = self.item_bounds(index, style, offset);
            let color: Color = if self.selected == Some(index) {
                style.selected_color
            } else {
                style.text_color
            };

            out.text(entry.item.display_text(), bounds, color.faded(alpha), 1.0);

            if let Some(fraction) = entry.item.fraction() {
                let bar = Rect::new(
                    bounds.position + Vec2::new(style.item_width - style.slider_width, style.line_height * 0.5 - 4.0),
                    Vec2::new(style.slider_width * fraction, 8.0),
                );
                out.fill(bar, color.faded(alpha));
            }
        }
    }

    fn is_popup(&self) -> bool {
        self.popup
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
