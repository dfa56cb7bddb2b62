//! Input subsystem.
//!
//! Platform-agnostic: the runtime translates winit events into [`InputEvent`]s
//! and the application reads them from the per-frame [`InputFrame`].

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
