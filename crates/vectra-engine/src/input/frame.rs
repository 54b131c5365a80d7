use super::types::{ButtonState, InputEvent, Key};

/// Input events received since the previous frame, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    #[inline]
    pub fn push(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Whether `key` went down this frame (repeats excluded).
    pub fn key_pressed(&self, key: Key) -> bool {
        self.events.iter().any(|e| {
            matches!(*e, InputEvent::Key { key: k, state: ButtonState::Pressed, repeat: false } if k == key)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pressed_ignores_repeats_and_releases() {
        let mut f = InputFrame::default();
        f.push(InputEvent::Key { key: Key::Char('g'), state: ButtonState::Pressed, repeat: true });
        f.push(InputEvent::Key { key: Key::Char('r'), state: ButtonState::Released, repeat: false });
        assert!(!f.key_pressed(Key::Char('g')));
        assert!(!f.key_pressed(Key::Char('r')));

        f.push(InputEvent::Key { key: Key::Char('g'), state: ButtonState::Pressed, repeat: false });
        assert!(f.key_pressed(Key::Char('g')));

        f.clear();
        assert!(f.events.is_empty());
    }
}
