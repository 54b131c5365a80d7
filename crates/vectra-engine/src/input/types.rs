use crate::coords::Vec2;

/// Keyboard key.
///
/// Letters and digits arrive as lowercase [`Key::Char`]; keys the engine does
/// not name map to `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    Control,
    Alt,
    Meta,
    Unknown,
}

/// Press/release transition, shared by keys and pointer buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Logical pixels per wheel "line" when converting pixel deltas to steps.
pub const PIXELS_PER_LINE: f64 = 40.0;

/// Wheel delta as reported by the platform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Lines { x: f64, y: f64 },
    /// Logical pixels (touchpads).
    Pixels { x: f64, y: f64 },
}

impl WheelDelta {
    /// Vertical scroll in line steps; positive scrolls up / away from the user.
    pub fn vertical_steps(self) -> f64 {
        match self {
            WheelDelta::Lines { y, .. } => y,
            WheelDelta::Pixels { y, .. } => y / PIXELS_PER_LINE,
        }
    }
}

/// Platform-agnostic input event. Positions are logical pixels, window top-left origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerButton {
        button: MouseButton,
        state: ButtonState,
        position: Vec2,
    },
    Wheel {
        delta: WheelDelta,
        position: Vec2,
    },
    Key {
        key: Key,
        state: ButtonState,
        repeat: bool,
    },
    ModifiersChanged(Modifiers),
    PointerLeft,
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_steps_normalize_pixel_deltas() {
        assert_eq!(WheelDelta::Lines { x: 0.0, y: -2.0 }.vertical_steps(), -2.0);
        assert_eq!(WheelDelta::Pixels { x: 5.0, y: 80.0 }.vertical_steps(), 2.0);
    }
}
