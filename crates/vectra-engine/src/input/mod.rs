//! Input subsystem.
//!
//! Public types are platform-agnostic; the window runtime translates winit
//! events through `platform` and feeds them to [`InputState`] and the
//! per-frame [`InputFrame`].

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton, WheelDelta, PIXELS_PER_LINE};
