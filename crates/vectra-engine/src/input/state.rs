use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};

/// Held keys/buttons and pointer position for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Last pointer position in logical pixels; `None` while outside the window.
    pub pointer: Option<Vec2>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton { button, state, position } => {
                self.pointer = Some(position);
                match state {
                    ButtonState::Pressed => self.buttons_down.insert(button),
                    ButtonState::Released => self.buttons_down.remove(&button),
                };
            }
            InputEvent::Wheel { position, .. } => self.pointer = Some(position),
            InputEvent::Key { key, state, .. } => {
                match state {
                    ButtonState::Pressed => self.keys_down.insert(key),
                    ButtonState::Released => self.keys_down.remove(&key),
                };
            }
            InputEvent::ModifiersChanged(m) => self.modifiers = m,
            InputEvent::Focused(f) => {
                self.focused = f;
                // Releases can be missed while unfocused.
                if !f {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
        }
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_buttons_and_pointer() {
        let mut s = InputState::default();
        s.apply(&InputEvent::PointerButton {
            button: MouseButton::Right,
            state: ButtonState::Pressed,
            position: Vec2::new(3.0, 4.0),
        });
        assert!(s.button_down(MouseButton::Right));
        assert_eq!(s.pointer, Some(Vec2::new(3.0, 4.0)));

        s.apply(&InputEvent::PointerButton {
            button: MouseButton::Right,
            state: ButtonState::Released,
            position: Vec2::new(5.0, 4.0),
        });
        assert!(!s.button_down(MouseButton::Right));

        s.apply(&InputEvent::PointerLeft);
        assert_eq!(s.pointer, None);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply(&InputEvent::Key { key: Key::Char('r'), state: ButtonState::Pressed, repeat: false });
        assert!(s.key_down(Key::Char('r')));
        s.apply(&InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
    }
}
