//! winit -> [`InputEvent`] translation.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::coords::Vec2;

use super::{ButtonState, InputEvent, InputState, Key, Modifiers, MouseButton, WheelDelta};

/// Returns `None` for events the input subsystem does not represent.
pub(crate) fn translate_window_event(window: &Window, state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CursorMoved { position, .. } => InputEvent::PointerMoved(to_logical(window, *position)),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::Focused(f) => InputEvent::Focused(*f),
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(map_modifiers(m.state())),

        // Buttons and wheel carry no position in winit 0.30; use the tracked one.
        WindowEvent::MouseInput { state: st, button, .. } => InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*st),
            position: state.pointer.unwrap_or_default(),
        },
        WindowEvent::MouseWheel { delta, .. } => InputEvent::Wheel {
            delta: match delta {
                MouseScrollDelta::LineDelta(x, y) => WheelDelta::Lines { x: *x as f64, y: *y as f64 },
                MouseScrollDelta::PixelDelta(p) => {
                    let l = to_logical(window, *p);
                    WheelDelta::Pixels { x: l.x, y: l.y }
                }
            },
            position: state.pointer.unwrap_or_default(),
        },

        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        },

        _ => return None,
    };
    Some(ev)
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let l = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(l.x, l.y)
}

fn map_state(s: ElementState) -> ButtonState {
    match s {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown;
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Char('-'),
        KeyCode::Equal | KeyCode::NumpadAdd => Key::Char('='),
        other => key_char(other).map_or(Key::Unknown, Key::Char),
    }
}

/// Letters and digits by physical position (US layout).
fn key_char(code: KeyCode) -> Option<char> {
    macro_rules! table {
        ($($k:ident => $c:literal),* $(,)?) => {
            match code {
                $(KeyCode::$k => Some($c),)*
                _ => None,
            }
        };
    }
    table! {
        KeyA => 'a', KeyB => 'b', KeyC => 'c', KeyD => 'd', KeyE => 'e', KeyF => 'f',
        KeyG => 'g', KeyH => 'h', KeyI => 'i', KeyJ => 'j', KeyK => 'k', KeyL => 'l',
        KeyM => 'm', KeyN => 'n', KeyO => 'o', KeyP => 'p', KeyQ => 'q', KeyR => 'r',
        KeyS => 's', KeyT => 't', KeyU => 'u', KeyV => 'v', KeyW => 'w', KeyX => 'x',
        KeyY => 'y', KeyZ => 'z',
        Digit0 => '0', Digit1 => '1', Digit2 => '2', Digit3 => '3', Digit4 => '4',
        Digit5 => '5', Digit6 => '6', Digit7 => '7', Digit8 => '8', Digit9 => '9',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map_to_lowercase_chars() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyR)), Key::Char('r'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyG)), Key::Char('g'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit7)), Key::Char('7'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F5)), Key::Unknown);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }
}
