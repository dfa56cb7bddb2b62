//! Editor controller.
//!
//! Turns pointer and keyboard input into point-set mutations and history
//! commits. Owns the model; rendering and exports only read it.

use mesh_engine::coords::{CanvasMapping, Vec2};
use mesh_engine::input::MouseButton;
use mesh_engine::overlay::OverlayState;
use mesh_engine::window::CursorIcon;
use mesh_model::{
    find_preset, kernel, GradientPoint, GradientState, History, PointField, Position, Snapshot, PRESETS,
};

use crate::export::ExportKind;

/// Discrete editor actions, usually produced by the keymap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    DeleteSelected,
    ClearSelection,
    CycleSelection { reverse: bool },
    /// Moves the selected point, in normalized units.
    Nudge { dx: f32, dy: f32 },
    AdjustIntensity(f32),
    AdjustBend(f32),
    AdjustElongation(f32),
    AdjustNoise(f32),
    RotateHue(f32),
    LoadPreset(usize),
    CopyCss,
    SaveSvg,
    SavePng,
}

/// One undo step.
#[derive(Debug, Clone, PartialEq)]
struct Checkpoint {
    points: Snapshot,
    noise: f32,
}

pub struct Editor {
    state: GradientState,
    history: History<Checkpoint>,
    canvas: CanvasMapping,

    pointer: Option<Vec2>,
    hovered: Option<usize>,
    /// Index of the point following the pointer.
    drag: Option<usize>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(GradientState::default())
    }
}

impl Editor {
    pub fn new(state: GradientState) -> Self {
        let initial = Checkpoint { points: state.snapshot(), noise: state.noise_amount() };
        Self {
            state,
            history: History::new(initial),
            canvas: CanvasMapping::default(),
            pointer: None,
            hovered: None,
            drag: None,
        }
    }

    /// Editor starting from the preset called `name` (case-insensitive).
    pub fn from_preset(name: &str) -> Option<Self> {
        let preset = find_preset(name)?;
        match GradientState::from_points(preset.points()) {
            Ok(state) => Some(Self::new(state)),
            Err(e) => {
                log::warn!("preset '{}' unusable: {e}", preset.name);
                None
            }
        }
    }

    #[inline]
    pub fn state(&self) -> &GradientState {
        &self.state
    }

    #[inline]
    pub fn points(&self) -> &[GradientPoint] {
        self.state.points()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn canvas(&self) -> &CanvasMapping {
        &self.canvas
    }

    pub fn set_canvas(&mut self, canvas: CanvasMapping) {
        self.canvas = canvas;
    }

    pub fn overlay_state(&self) -> OverlayState {
        OverlayState {
            selected: self.state.selected(),
            hovered: self.hovered,
            pointer: self.pointer,
            dragging: self.drag.is_some(),
        }
    }

    pub fn cursor(&self) -> CursorIcon {
        if self.drag.is_some() {
            CursorIcon::Grabbing
        } else if self.hovered.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Crosshair
        }
    }

    pub fn title(&self) -> String {
        let mut title = format!("mesh studio - {} points", self.state.len());
        if let Some(i) = self.state.selected() {
            title.push_str(&format!(", point {} selected", i + 1));
        }
        title
    }

    // ── pointer ───────────────────────────────────────────────────────────

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        let uv = self.canvas.to_normalized(pos);

        if let Some(i) = self.drag {
            if let Err(e) = self.state.update_field(i, PointField::Position(uv)) {
                log::debug!("drag of point {i} dropped: {e}");
                self.drag = None;
            }
            self.hovered = self.drag;
            return;
        }

        self.hovered = if self.canvas.contains(pos) { self.state.find_nearest(uv) } else { None };
    }

    pub fn pointer_down(&mut self, button: MouseButton, pos: Vec2) {
        self.pointer = Some(pos);
        if self.drag.is_some() || !self.canvas.contains(pos) {
            return;
        }
        let uv = self.canvas.to_normalized(pos);
        let hit = self.state.find_nearest(uv);

        match (button, hit) {
            (MouseButton::Left, Some(i)) => {
                self.state.select(Some(i));
                self.start_drag(i);
            }
            (MouseButton::Left, None) => self.add_point_at(uv),
            (MouseButton::Right, Some(i)) => self.remove(i),
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.end_drag();
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        if self.drag.is_none() {
            self.hovered = None;
        }
    }

    /// Releases are not delivered while unfocused, so a drag ends here.
    pub fn focus_lost(&mut self) {
        self.end_drag();
    }

    fn start_drag(&mut self, index: usize) {
        self.drag = Some(index);
        self.hovered = Some(index);
    }

    fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.commit();
        }
    }

    /// New points take the gradient's current color under the pointer and
    /// follow it until release.
    fn add_point_at(&mut self, uv: Position) {
        let color = kernel::sample(self.state.points(), uv);
        match self.state.add_point(uv, color) {
            Ok(i) => {
                self.state.select(Some(i));
                self.start_drag(i);
            }
            Err(e) => log::debug!("add point rejected: {e}"),
        }
    }

    fn remove(&mut self, index: usize) {
        match self.state.remove_point(index) {
            Ok(_) => {
                self.hovered = None;
                self.drag = match self.drag {
                    Some(d) if d == index => None,
                    Some(d) if d > index => Some(d - 1),
                    other => other,
                };
                self.commit();
            }
            Err(e) => log::debug!("remove point {} rejected: {e}", index + 1),
        }
    }

    // ── commands ──────────────────────────────────────────────────────────

    /// Applies `cmd`. Export commands are returned for the caller to perform.
    pub fn apply(&mut self, cmd: Command) -> Option<ExportKind> {
        match cmd {
            Command::Undo => {
                if let Some(cp) = self.history.undo().cloned() {
                    self.restore(cp);
                }
            }
            Command::Redo => {
                if let Some(cp) = self.history.redo().cloned() {
                    self.restore(cp);
                }
            }

            Command::DeleteSelected => {
                if self.drag.is_some() {
                    log::debug!("delete ignored while dragging");
                } else if let Some(i) = self.state.selected() {
                    self.remove(i);
                }
            }
            Command::ClearSelection => self.state.select(None),
            Command::CycleSelection { reverse } => self.cycle_selection(reverse),

            Command::Nudge { dx, dy } => self.edit_selected(|p| {
                PointField::Position(Position::new(p.position.x + dx, p.position.y + dy))
            }),
            Command::AdjustIntensity(d) => self.edit_selected(|p| PointField::Intensity(p.intensity + d)),
            Command::AdjustBend(d) => self.edit_selected(|p| PointField::Bend(p.bend + d)),
            Command::AdjustElongation(d) => {
                self.edit_selected(|p| PointField::Elongation(p.elongation + d))
            }

            Command::AdjustNoise(d) => {
                self.state.set_noise_amount(self.state.noise_amount() + d);
                self.commit();
            }
            Command::RotateHue(deg) => {
                self.state.rotate_hue(deg);
                self.commit();
            }
            Command::LoadPreset(i) => match PRESETS.get(i) {
                Some(preset) => match self.state.load_preset(preset) {
                    Ok(()) => {
                        log::info!("loaded preset '{}'", preset.name);
                        self.drag = None;
                        self.hovered = None;
                        self.commit();
                    }
                    Err(e) => log::debug!("preset '{}' rejected: {e}", preset.name),
                },
                None => log::debug!("no preset {}", i + 1),
            },

            Command::CopyCss => return Some(ExportKind::Css),
            Command::SaveSvg => return Some(ExportKind::Svg),
            Command::SavePng => return Some(ExportKind::Png),
        }
        None
    }

    fn cycle_selection(&mut self, reverse: bool) {
        let n = self.state.len();
        let next = match (self.state.selected(), reverse) {
            (None, false) => 0,
            (None, true) => n - 1,
            (Some(i), false) => (i + 1) % n,
            (Some(i), true) => (i + n - 1) % n,
        };
        self.state.select(Some(next));
    }

    fn edit_selected(&mut self, field: impl FnOnce(&GradientPoint) -> PointField) {
        let Some(i) = self.state.selected() else {
            log::debug!("no point selected");
            return;
        };
        let Some(point) = self.state.point(i) else { return };
        let field = field(point);
        match self.state.update_field(i, field) {
            Ok(()) => self.commit(),
            Err(e) => log::debug!("edit of point {} rejected: {e}", i + 1),
        }
    }

    // ── history ───────────────────────────────────────────────────────────

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint { points: self.state.snapshot(), noise: self.state.noise_amount() }
    }

    fn commit(&mut self) {
        let cp = self.checkpoint();
        if self.history.commit(cp) {
            log::debug!("history: {}/{}", self.history.cursor() + 1, self.history.len());
        }
    }

    fn restore(&mut self, cp: Checkpoint) {
        if let Err(e) = self.state.restore(cp.points) {
            log::debug!("history entry rejected: {e}");
            return;
        }
        self.state.set_noise_amount(cp.noise);
        self.drag = None;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_engine::coords::Viewport;
    use mesh_model::Rgb;

    fn editor() -> Editor {
        let mut ed = Editor::default();
        ed.set_canvas(CanvasMapping::from_viewport(Viewport::new(100.0, 100.0)));
        ed
    }

    fn click(ed: &mut Editor, button: MouseButton, x: f32, y: f32) {
        ed.pointer_moved(Vec2::new(x, y));
        ed.pointer_down(button, Vec2::new(x, y));
        ed.pointer_up(button);
    }

    fn close(a: Position, b: Position) -> bool {
        a.distance(b) < 1e-4
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn click_on_empty_canvas_adds_blended_point() {
        let mut ed = editor();
        let expected = kernel::sample(ed.points(), Position::new(0.9, 0.1));

        click(&mut ed, MouseButton::Left, 90.0, 90.0);

        assert_eq!(ed.state().len(), 4);
        assert_eq!(ed.state().selected(), Some(3));
        let added = ed.state().point(3).unwrap();
        assert!(close(added.position, Position::new(0.9, 0.1)));
        assert_eq!(added.color, expected);
        assert_eq!(ed.history_len(), 2);
    }

    #[test]
    fn added_point_follows_pointer_until_release() {
        let mut ed = editor();
        ed.pointer_down(MouseButton::Left, Vec2::new(90.0, 90.0));
        ed.pointer_moved(Vec2::new(70.0, 60.0));
        ed.pointer_up(MouseButton::Left);

        assert!(close(ed.state().point(3).unwrap().position, Position::new(0.7, 0.4)));
        assert_eq!(ed.history_len(), 2);

        ed.apply(Command::Undo);
        assert_eq!(ed.state().len(), 3);
    }

    #[test]
    fn drag_moves_point_and_commits_once() {
        let mut ed = editor();
        // First default point sits at (0.2, 0.8) -> (20, 20) logical.
        ed.pointer_down(MouseButton::Left, Vec2::new(20.0, 20.0));
        assert_eq!(ed.state().selected(), Some(0));
        assert_eq!(ed.cursor(), CursorIcon::Grabbing);

        ed.pointer_moved(Vec2::new(30.0, 30.0));
        ed.pointer_moved(Vec2::new(40.0, 40.0));
        assert_eq!(ed.history_len(), 1);
        ed.pointer_up(MouseButton::Left);

        assert!(close(ed.state().point(0).unwrap().position, Position::new(0.4, 0.6)));
        assert_eq!(ed.history_len(), 2);

        ed.apply(Command::Undo);
        assert!(close(ed.state().point(0).unwrap().position, Position::new(0.2, 0.8)));
    }

    #[test]
    fn click_without_moving_leaves_history_alone() {
        let mut ed = editor();
        click(&mut ed, MouseButton::Left, 20.0, 20.0);
        assert_eq!(ed.state().selected(), Some(0));
        assert_eq!(ed.history_len(), 1);
    }

    #[test]
    fn right_click_removes_until_two_remain() {
        let mut ed = editor();
        click(&mut ed, MouseButton::Right, 20.0, 20.0);
        assert_eq!(ed.state().len(), 2);
        assert_eq!(ed.history_len(), 2);

        // (0.5, 0.2) is now index 1 -> (50, 80) logical.
        click(&mut ed, MouseButton::Right, 50.0, 80.0);
        assert_eq!(ed.state().len(), 2);
        assert_eq!(ed.history_len(), 2);
    }

    #[test]
    fn add_rejected_when_full() {
        let points = (0..32)
            .map(|i| {
                let (col, row) = ((i % 8) as f32, (i / 8) as f32);
                GradientPoint::new(Position::new(0.05 + col * 0.1, 0.05 + row * 0.1), Rgb::new(0.5, 0.5, 0.5))
            })
            .collect();
        let mut ed = Editor::new(GradientState::from_points(points).unwrap());
        ed.set_canvas(CanvasMapping::from_viewport(Viewport::new(100.0, 100.0)));

        click(&mut ed, MouseButton::Left, 95.0, 5.0);
        assert_eq!(ed.state().len(), 32);
        assert_eq!(ed.history_len(), 1);
        assert_eq!(ed.state().selected(), None);
    }

    #[test]
    fn hover_tracks_nearest_point() {
        let mut ed = editor();
        ed.pointer_moved(Vec2::new(80.5, 30.0));
        assert_eq!(ed.overlay_state().hovered, Some(1));
        assert_eq!(ed.cursor(), CursorIcon::Pointer);

        ed.pointer_moved(Vec2::new(60.0, 60.0));
        assert_eq!(ed.overlay_state().hovered, None);
        assert!(ed.overlay_state().is_idle());
        assert_eq!(ed.cursor(), CursorIcon::Crosshair);

        ed.pointer_left();
        assert_eq!(ed.overlay_state().pointer, None);
    }

    #[test]
    fn delete_during_drag_leaves_other_points_alone() {
        let mut ed = editor();
        ed.pointer_down(MouseButton::Left, Vec2::new(20.0, 20.0));
        let before = ed.state().snapshot();

        ed.apply(Command::DeleteSelected);
        ed.pointer_moved(Vec2::new(50.0, 50.0));
        ed.pointer_up(MouseButton::Left);

        // The grabbed point moves; the other two stay put.
        assert_eq!(ed.state().len(), 3);
        assert!(close(ed.state().point(0).unwrap().position, Position::new(0.5, 0.5)));
        assert_eq!(ed.state().points()[1..], before[1..]);
        assert_eq!(ed.history_len(), 2);
    }

    #[test]
    fn removing_an_earlier_point_keeps_drag_on_grabbed_point() {
        let mut ed = editor();
        // Third default point at (0.5, 0.2) -> (50, 80) logical.
        ed.pointer_down(MouseButton::Left, Vec2::new(50.0, 80.0));
        ed.remove(0);
        ed.pointer_moved(Vec2::new(10.0, 10.0));
        ed.pointer_up(MouseButton::Left);

        assert_eq!(ed.state().len(), 2);
        assert!(close(ed.state().point(0).unwrap().position, Position::new(0.8, 0.7)));
        assert!(close(ed.state().point(1).unwrap().position, Position::new(0.1, 0.9)));
    }

    #[test]
    fn removing_the_grabbed_point_ends_drag() {
        let mut ed = editor();
        ed.pointer_down(MouseButton::Left, Vec2::new(20.0, 20.0));
        ed.remove(0);
        assert!(!ed.overlay_state().dragging);

        let after_remove = ed.state().snapshot();
        ed.pointer_moved(Vec2::new(50.0, 50.0));
        ed.pointer_up(MouseButton::Left);
        assert_eq!(ed.state().snapshot(), after_remove);
        assert_eq!(ed.history_len(), 2);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut ed = editor();
        ed.pointer_down(MouseButton::Left, Vec2::new(20.0, 20.0));
        ed.pointer_moved(Vec2::new(50.0, 50.0));
        ed.focus_lost();
        assert!(!ed.overlay_state().dragging);
        assert_eq!(ed.history_len(), 2);
    }

    // ── commands ──────────────────────────────────────────────────────────

    #[test]
    fn undo_redo_round_trip_and_no_ops_at_ends() {
        let mut ed = editor();
        assert_eq!(ed.apply(Command::Undo), None);
        assert!(!ed.can_undo());

        ed.apply(Command::RotateHue(90.0));
        let rotated = ed.state().snapshot();

        ed.apply(Command::Undo);
        assert_eq!(ed.state().snapshot(), GradientState::default().snapshot());
        ed.apply(Command::Redo);
        assert_eq!(ed.state().snapshot(), rotated);

        ed.apply(Command::Redo);
        assert_eq!(ed.state().snapshot(), rotated);
        assert!(!ed.can_redo());
    }

    #[test]
    fn edits_need_a_selection() {
        let mut ed = editor();
        ed.apply(Command::Nudge { dx: 0.1, dy: 0.0 });
        ed.apply(Command::AdjustIntensity(0.5));
        assert_eq!(ed.history_len(), 1);

        ed.apply(Command::CycleSelection { reverse: false });
        ed.apply(Command::Nudge { dx: 0.1, dy: 0.0 });
        ed.apply(Command::AdjustBend(1.0));
        let p = ed.state().point(0).unwrap();
        assert!(close(p.position, Position::new(0.3, 0.8)));
        assert_eq!(p.bend, 4.0);
        assert_eq!(ed.history_len(), 3);
    }

    #[test]
    fn cycle_selection_wraps_both_ways() {
        let mut ed = editor();
        ed.apply(Command::CycleSelection { reverse: true });
        assert_eq!(ed.state().selected(), Some(2));
        ed.apply(Command::CycleSelection { reverse: false });
        assert_eq!(ed.state().selected(), Some(0));
        ed.apply(Command::ClearSelection);
        assert_eq!(ed.state().selected(), None);
    }

    #[test]
    fn delete_selected_respects_minimum() {
        let mut ed = editor();
        ed.apply(Command::CycleSelection { reverse: false });
        ed.apply(Command::DeleteSelected);
        assert_eq!(ed.state().len(), 2);
        assert_eq!(ed.state().selected(), None);

        ed.apply(Command::CycleSelection { reverse: false });
        ed.apply(Command::DeleteSelected);
        assert_eq!(ed.state().len(), 2);
    }

    #[test]
    fn noise_changes_are_undoable() {
        let mut ed = editor();
        ed.apply(Command::AdjustNoise(15.0));
        assert_eq!(ed.state().noise_amount(), 15.0);
        ed.apply(Command::Undo);
        assert_eq!(ed.state().noise_amount(), 0.0);
    }

    #[test]
    fn presets_replace_points() {
        let mut ed = editor();
        ed.apply(Command::LoadPreset(0));
        assert_eq!(ed.state().len(), PRESETS[0].len());
        assert_eq!(ed.history_len(), 2);

        ed.apply(Command::LoadPreset(PRESETS.len()));
        assert_eq!(ed.history_len(), 2);
    }

    #[test]
    fn starts_from_named_preset() {
        let ed = Editor::from_preset(&PRESETS[1].name.to_uppercase()).unwrap();
        assert_eq!(ed.state().snapshot(), PRESETS[1].points());
        assert_eq!(ed.history_len(), 1);
        assert!(!ed.can_undo());

        assert!(Editor::from_preset("no such palette").is_none());
    }

    #[test]
    fn export_commands_do_not_mutate() {
        let mut ed = editor();
        assert_eq!(ed.apply(Command::CopyCss), Some(ExportKind::Css));
        assert_eq!(ed.apply(Command::SaveSvg), Some(ExportKind::Svg));
        assert_eq!(ed.apply(Command::SavePng), Some(ExportKind::Png));
        assert_eq!(ed.history_len(), 1);
    }

    #[test]
    fn title_reports_count_and_selection() {
        let mut ed = editor();
        assert_eq!(ed.title(), "mesh studio - 3 points");
        ed.apply(Command::CycleSelection { reverse: false });
        assert_eq!(ed.title(), "mesh studio - 3 points, point 1 selected");
    }
}
