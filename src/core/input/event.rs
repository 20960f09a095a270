//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable keyboard and mouse events produced by the platform thread.
//
// Flow:
// ```text
//   winit WindowEvent ─► InputProcessor ─► InputEvent ─► StateTracker
// ```
//
// Only the keys the framework and typical jam games react to are named;
// everything else maps to `KeyCode::Unidentified`.
//
//=========================================================================

//=== MouseButton =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Physical key identifier (layout independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier keys held when an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

//=== InputEvent ==========================================================

/// One low-level input occurrence.
///
/// Discrete events (keys, buttons) are delivered in order; `MouseMoved`
/// is continuous and coalesced by the platform to the last position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },
    MouseMoved { x: f32, y: f32 },
    Unidentified,
}

impl InputEvent {
    /// Replaces the modifier state on key and button events.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => *m = modifiers,
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
        self
    }

    /// `true` for events that must not be coalesced.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_modifiers_updates_key_events() {
        let event = InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::NONE }
            .with_modifiers(Modifiers::SHIFT);

        assert_eq!(event, InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::SHIFT });
    }

    #[test]
    fn with_modifiers_leaves_motion_alone() {
        let event = InputEvent::MouseMoved { x: 3.0, y: 4.0 }.with_modifiers(Modifiers::CTRL);
        assert_eq!(event, InputEvent::MouseMoved { x: 3.0, y: 4.0 });
    }

    #[test]
    fn mouse_motion_is_continuous() {
        assert!(!InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_discrete());
        assert!(InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE }.is_discrete());
    }

    #[test]
    fn modifiers_any() {
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::ALT.any());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
