use mesh_engine::input::{Key, Modifiers};

use crate::editor::Command;

pub const NUDGE_STEP: f32 = 0.01;
pub const NUDGE_STEP_COARSE: f32 = 0.05;
pub const INTENSITY_STEP: f32 = 0.1;
pub const BEND_STEP: f32 = 0.25;
pub const ELONGATION_STEP: f32 = 0.1;
pub const NOISE_STEP: f32 = 5.0;
pub const HUE_STEP: f32 = 30.0;

/// Maps a key press to an editor command.
pub fn command_for(key: Key, mods: Modifiers) -> Option<Command> {
    if mods.command() {
        return match key {
            Key::Z if mods.shift => Some(Command::Redo),
            Key::Z => Some(Command::Undo),
            Key::Y => Some(Command::Redo),
            Key::C => Some(Command::CopyCss),
            Key::S => Some(Command::SaveSvg),
            _ => None,
        };
    }

    let sign = |positive: bool| if positive { 1.0 } else { -1.0 };
    let step = if mods.shift { NUDGE_STEP_COARSE } else { NUDGE_STEP };

    let cmd = match key {
        Key::Delete | Key::Backspace => Command::DeleteSelected,
        Key::Escape => Command::ClearSelection,
        Key::Tab => Command::CycleSelection { reverse: mods.shift },

        Key::ArrowLeft => Command::Nudge { dx: -step, dy: 0.0 },
        Key::ArrowRight => Command::Nudge { dx: step, dy: 0.0 },
        // Gradient space is +Y up.
        Key::ArrowUp => Command::Nudge { dx: 0.0, dy: step },
        Key::ArrowDown => Command::Nudge { dx: 0.0, dy: -step },

        Key::I | Key::K => Command::AdjustIntensity(sign(key == Key::I) * INTENSITY_STEP),
        Key::B | Key::N => Command::AdjustBend(sign(key == Key::B) * BEND_STEP),
        Key::E | Key::D => Command::AdjustElongation(sign(key == Key::E) * ELONGATION_STEP),
        Key::U | Key::J => Command::AdjustNoise(sign(key == Key::U) * NOISE_STEP),
        Key::H => Command::RotateHue(sign(!mods.shift) * HUE_STEP),

        Key::C => Command::CopyCss,
        Key::S => Command::SaveSvg,
        Key::P => Command::SavePng,

        other => match other.digit() {
            Some(d @ 1..=9) => Command::LoadPreset(usize::from(d - 1)),
            _ => return None,
        },
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    const SHIFT: Modifiers = Modifiers { shift: true, ..NONE };
    const CTRL: Modifiers = Modifiers { ctrl: true, ..NONE };
    const CTRL_SHIFT: Modifiers = Modifiers { ctrl: true, shift: true, ..NONE };
    const CMD: Modifiers = Modifiers { meta: true, ..NONE };

    // ── history ───────────────────────────────────────────────────────────

    #[test]
    fn undo_redo_chords() {
        assert_eq!(command_for(Key::Z, CTRL), Some(Command::Undo));
        assert_eq!(command_for(Key::Z, CMD), Some(Command::Undo));
        assert_eq!(command_for(Key::Z, CTRL_SHIFT), Some(Command::Redo));
        assert_eq!(command_for(Key::Y, CTRL), Some(Command::Redo));
    }

    #[test]
    fn plain_z_is_unbound() {
        assert_eq!(command_for(Key::Z, NONE), None);
        assert_eq!(command_for(Key::Q, CTRL), None);
    }

    // ── selection + editing ───────────────────────────────────────────────

    #[test]
    fn selection_keys() {
        assert_eq!(command_for(Key::Delete, NONE), Some(Command::DeleteSelected));
        assert_eq!(command_for(Key::Backspace, NONE), Some(Command::DeleteSelected));
        assert_eq!(command_for(Key::Escape, NONE), Some(Command::ClearSelection));
        assert_eq!(command_for(Key::Tab, SHIFT), Some(Command::CycleSelection { reverse: true }));
    }

    #[test]
    fn arrows_nudge_with_y_up_and_shift_coarse() {
        assert_eq!(command_for(Key::ArrowUp, NONE), Some(Command::Nudge { dx: 0.0, dy: NUDGE_STEP }));
        assert_eq!(
            command_for(Key::ArrowLeft, SHIFT),
            Some(Command::Nudge { dx: -NUDGE_STEP_COARSE, dy: 0.0 })
        );
    }

    #[test]
    fn field_adjustments_come_in_pairs() {
        assert_eq!(command_for(Key::I, NONE), Some(Command::AdjustIntensity(INTENSITY_STEP)));
        assert_eq!(command_for(Key::K, NONE), Some(Command::AdjustIntensity(-INTENSITY_STEP)));
        assert_eq!(command_for(Key::N, NONE), Some(Command::AdjustBend(-BEND_STEP)));
        assert_eq!(command_for(Key::E, NONE), Some(Command::AdjustElongation(ELONGATION_STEP)));
        assert_eq!(command_for(Key::J, NONE), Some(Command::AdjustNoise(-NOISE_STEP)));
        assert_eq!(command_for(Key::H, SHIFT), Some(Command::RotateHue(-HUE_STEP)));
    }

    // ── presets + export ──────────────────────────────────────────────────

    #[test]
    fn digits_load_presets_zero_based() {
        assert_eq!(command_for(Key::Digit1, NONE), Some(Command::LoadPreset(0)));
        assert_eq!(command_for(Key::Digit5, NONE), Some(Command::LoadPreset(4)));
        assert_eq!(command_for(Key::Digit0, NONE), None);
    }

    #[test]
    fn export_keys() {
        assert_eq!(command_for(Key::C, NONE), Some(Command::CopyCss));
        assert_eq!(command_for(Key::C, CTRL), Some(Command::CopyCss));
        assert_eq!(command_for(Key::S, NONE), Some(Command::SaveSvg));
        assert_eq!(command_for(Key::P, NONE), Some(Command::SavePng));
    }
}
