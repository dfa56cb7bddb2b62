use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels; `None` outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the current state and appends it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !*focused {
                    // Releases are not delivered to unfocused windows.
                    self.buttons_down.clear();
                    self.modifiers = Modifiers::default();
                }
            }

            InputEvent::PointerMoved(p) => self.pointer_pos = Some((p.x, p.y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, repeat } => {
                self.modifiers = *modifiers;
                if *state == KeyState::Pressed && !*repeat {
                    frame.keys_pressed.insert(*key);
                }
            }

            InputEvent::PointerButton(b) => {
                self.pointer_pos = Some((b.x, b.y));
                self.modifiers = b.modifiers;
                match b.state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(b.button) {
                            frame.buttons_pressed.insert(b.button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(&b.button) {
                            frame.buttons_released.insert(b.button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, PointerButtonEvent, PointerMoveEvent};

    fn button(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 10.0,
            y: 20.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn press_and_release_in_one_frame_are_both_recorded() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        state.apply_event(&mut frame, button(MouseButtonState::Released));

        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert!(!state.buttons_down.contains(&MouseButton::Left));
        assert_eq!(frame.events.len(), 2);
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.buttons_down.contains(&MouseButton::Left));
    }

    #[test]
    fn key_repeat_is_not_a_fresh_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let ev = InputEvent::Key {
            key: Key::ArrowLeft,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: true,
        };
        state.apply_event(&mut frame, ev);
        assert!(frame.keys_pressed.is_empty());
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
        frame.clear();
        assert!(frame.is_empty());
    }
}
