//! Keyboard input.
//!
//! The public types carry no winit types; the runtime translates window events through
//! `translate_window_event` and feeds them to [`InputState::apply_event`].

mod frame;
mod state;
mod types;
mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};

pub(crate) use platform::translate_window_event;
