//! Point-handle overlay.
//!
//! Builds the 2-D handle layer drawn over the gradient: a crosshair and a
//! numbered disc per point, a dashed ring on the selected and hovered points,
//! and a ghost ring following the pointer while idle. Reads the point set,
//! never mutates it.

use mesh_model::GradientPoint;

use crate::coords::{CanvasMapping, Rect, Vec2};
use crate::paint::Color;
use crate::scene::{Border, DrawList, ZIndex};

const Z_CROSSHAIR: ZIndex = ZIndex(0);
const Z_DISC: ZIndex = ZIndex(1);
const Z_LABEL: ZIndex = ZIndex(2);
const Z_RING: ZIndex = ZIndex(3);
const Z_GHOST: ZIndex = ZIndex(4);

/// Interaction state the overlay reflects.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    /// Pointer in window logical pixels, `None` outside the window.
    pub pointer: Option<Vec2>,
    pub dragging: bool,
}

impl OverlayState {
    /// Idle means the ghost ring is shown.
    pub fn is_idle(&self) -> bool {
        !self.dragging && self.hovered.is_none()
    }
}

/// Handle geometry (logical px) and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub disc_radius: f32,
    pub disc_border: f32,
    pub crosshair_length: f32,
    pub crosshair_width: f32,
    pub crosshair_color: Color,
    pub label_height: f32,
    pub ring_radius: f32,
    pub ring_width: f32,
    pub ring_dashes: u32,
    pub selected_color: Color,
    pub hovered_color: Color,
    pub ghost_radius: f32,
    pub ghost_color: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            disc_radius: 11.0,
            disc_border: 2.0,
            crosshair_length: 36.0,
            crosshair_width: 1.0,
            crosshair_color: Color::from_straight(1.0, 1.0, 1.0, 0.55),
            label_height: 9.0,
            ring_radius: 17.0,
            ring_width: 2.0,
            ring_dashes: 12,
            selected_color: Color::WHITE,
            hovered_color: Color::from_straight(1.0, 1.0, 1.0, 0.6),
            ghost_radius: 8.0,
            ghost_color: Color::from_straight(1.0, 1.0, 1.0, 0.45),
        }
    }
}

/// Records the overlay for `points` into `out` (cleared first).
pub fn build_overlay(
    points: &[GradientPoint],
    canvas: &CanvasMapping,
    state: &OverlayState,
    style: &OverlayStyle,
    out: &mut DrawList,
) {
    out.clear();

    for (i, p) in points.iter().enumerate() {
        let center = canvas.to_logical(p.position);
        push_crosshair(out, center, style);

        // Dark border and label on light colors, light on dark.
        let light = p.color.luminance() > 0.6;
        let ink = if light { Color::BLACK } else { Color::WHITE };

        out.push_disc(
            Z_DISC,
            center,
            style.disc_radius,
            Color::from_rgb(p.color, 1.0),
            Some(Border::new(style.disc_border, ink)),
        );
        out.push_number(Z_LABEL, center, style.label_height, (i + 1) as u32, ink);

        let ring = if state.selected == Some(i) {
            Some(style.selected_color)
        } else if state.hovered == Some(i) {
            Some(style.hovered_color)
        } else {
            None
        };
        if let Some(color) = ring {
            out.push_dashed_ring(Z_RING, center, style.ring_radius, style.ring_width, style.ring_dashes, color);
        }
    }

    if let Some(pointer) = state.pointer.filter(|p| state.is_idle() && canvas.contains(*p)) {
        out.push_disc(
            Z_GHOST,
            pointer,
            style.ghost_radius,
            Color::TRANSPARENT,
            Some(Border::new(1.5, style.ghost_color)),
        );
    }
}

fn push_crosshair(out: &mut DrawList, center: Vec2, style: &OverlayStyle) {
    let len = style.crosshair_length;
    let w = style.crosshair_width;
    out.push_rect(Z_CROSSHAIR, Rect::centered(center, Vec2::new(len, w)), style.crosshair_color);
    out.push_rect(Z_CROSSHAIR, Rect::centered(center, Vec2::new(w, len)), style.crosshair_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::scene::DrawCmd;
    use mesh_model::GradientState;

    fn canvas() -> CanvasMapping {
        CanvasMapping::from_viewport(Viewport::new(400.0, 400.0))
    }

    fn build(state: &OverlayState) -> DrawList {
        let points = GradientState::default();
        let mut list = DrawList::new();
        build_overlay(points.points(), &canvas(), state, &OverlayStyle::default(), &mut list);
        list
    }

    fn count(list: &DrawList, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        list.items().iter().filter(|it| pred(&it.cmd)).count()
    }

    // ── per point ─────────────────────────────────────────────────────────

    #[test]
    fn crosshair_disc_and_label_per_point() {
        let list = build(&OverlayState::default());
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Rect { .. })), 6);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Disc { .. })), 3);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Digit { .. })), 3);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::DashedRing { .. })), 0);
    }

    #[test]
    fn discs_sit_on_points_with_y_inverted() {
        let list = build(&OverlayState::default());
        let first = list
            .items()
            .iter()
            .find_map(|it| match it.cmd {
                DrawCmd::Disc { center, .. } => Some(center),
                _ => None,
            })
            .unwrap();
        // Default first point is at (0.2, 0.8).
        assert!((first.x - 80.0).abs() < 1e-4);
        assert!((first.y - 80.0).abs() < 1e-4);
    }

    #[test]
    fn labels_are_one_based() {
        let list = build(&OverlayState::default());
        let digits: Vec<u8> = list
            .items()
            .iter()
            .filter_map(|it| match it.cmd {
                DrawCmd::Digit { digit, .. } => Some(digit),
                _ => None,
            })
            .collect();
        assert_eq!(digits, [1, 2, 3]);
    }

    // ── highlight ─────────────────────────────────────────────────────────

    #[test]
    fn selected_and_hovered_get_dashed_rings() {
        let state = OverlayState { selected: Some(0), hovered: Some(2), ..Default::default() };
        let list = build(&state);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::DashedRing { .. })), 2);
    }

    #[test]
    fn same_point_selected_and_hovered_gets_one_ring() {
        let state = OverlayState { selected: Some(1), hovered: Some(1), ..Default::default() };
        let list = build(&state);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::DashedRing { .. })), 1);
    }

    // ── ghost ─────────────────────────────────────────────────────────────

    #[test]
    fn ghost_only_when_idle_over_canvas() {
        let ghost = |c: &DrawCmd| matches!(c, DrawCmd::Disc { fill, .. } if *fill == Color::TRANSPARENT);

        let idle = OverlayState { pointer: Some(Vec2::new(200.0, 200.0)), ..Default::default() };
        assert_eq!(count(&build(&idle), ghost), 1);

        let dragging = OverlayState { dragging: true, ..idle };
        assert_eq!(count(&build(&dragging), ghost), 0);

        let hovering = OverlayState { hovered: Some(0), ..idle };
        assert_eq!(count(&build(&hovering), ghost), 0);

        let outside = OverlayState { pointer: Some(Vec2::new(-5.0, 10.0)), ..Default::default() };
        assert_eq!(count(&build(&outside), ghost), 0);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let points = GradientState::default();
        let mut list = DrawList::new();
        let style = OverlayStyle::default();
        build_overlay(points.points(), &canvas(), &OverlayState::default(), &style, &mut list);
        let n = list.len();
        build_overlay(points.points(), &canvas(), &OverlayState::default(), &style, &mut list);
        assert_eq!(list.len(), n);
    }
}
