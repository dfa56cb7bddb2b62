use crate::color::Rgb;
use crate::error::PointSetError;
use crate::point::{GradientPoint, PointField, Position};
use crate::presets::Preset;

pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 32;

/// Pointer hit radius in normalized image space.
pub const HIT_RADIUS: f32 = 0.02;

pub const NOISE_RANGE: (f32, f32) = (0.0, 100.0);

/// Owned copy of a point set, as recorded by the undo history.
pub type Snapshot = Vec<GradientPoint>;

/// Editable gradient: the ordered point set plus UI-level extras.
///
/// Invariant: `MIN_POINTS <= points.len() <= MAX_POINTS`. Every mutator checks
/// it up front and rejects the request instead of partially applying it.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientState {
    points: Vec<GradientPoint>,
    noise_amount: f32,
    selected: Option<usize>,
}

impl Default for GradientState {
    /// The built-in three-point starting gradient.
    fn default() -> Self {
        Self {
            points: vec![
                GradientPoint::new(Position::new(0.2, 0.8), Rgb::from_u8(0xff, 0x6b, 0x6b)),
                GradientPoint::new(Position::new(0.8, 0.7), Rgb::from_u8(0x4e, 0xcd, 0xc4)),
                GradientPoint::new(Position::new(0.5, 0.2), Rgb::from_u8(0xff, 0xe6, 0x6d)),
            ],
            noise_amount: 0.0,
            selected: None,
        }
    }
}

impl GradientState {
    /// Builds a state from an explicit point list.
    pub fn from_points(points: Vec<GradientPoint>) -> Result<Self, PointSetError> {
        check_len(points.len())?;
        Ok(Self { points, noise_amount: 0.0, selected: None })
    }

    #[inline]
    pub fn points(&self) -> &[GradientPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<&GradientPoint> {
        self.points.get(index)
    }

    #[inline]
    pub fn noise_amount(&self) -> f32 {
        self.noise_amount
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn can_add(&self) -> bool {
        self.points.len() < MAX_POINTS
    }

    #[inline]
    pub fn can_remove(&self) -> bool {
        self.points.len() > MIN_POINTS
    }

    /// Sets UI focus. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.points.len());
    }

    /// Appends a point and returns its index.
    pub fn add_point(&mut self, position: Position, color: Rgb) -> Result<usize, PointSetError> {
        if !self.can_add() {
            return Err(PointSetError::TooManyPoints);
        }
        self.points.push(GradientPoint::new(position, color));
        Ok(self.points.len() - 1)
    }

    /// Removes the point at `index` and returns it.
    ///
    /// The selection follows the remaining points: it is cleared when the
    /// selected point is removed and shifted down when an earlier one is.
    pub fn remove_point(&mut self, index: usize) -> Result<GradientPoint, PointSetError> {
        self.check_index(index)?;
        if !self.can_remove() {
            return Err(PointSetError::TooFewPoints);
        }

        let removed = self.points.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn update_field(&mut self, index: usize, field: PointField) -> Result<(), PointSetError> {
        self.check_index(index)?;
        self.points[index].apply(field);
        Ok(())
    }

    /// Index of the point nearest to `position` within [`HIT_RADIUS`].
    ///
    /// Ties go to the lowest index.
    pub fn find_nearest(&self, position: Position) -> Option<usize> {
        find_nearest(&self.points, position)
    }

    pub fn set_noise_amount(&mut self, amount: f32) {
        if amount.is_finite() {
            self.noise_amount = amount.clamp(NOISE_RANGE.0, NOISE_RANGE.1);
        }
    }

    /// Rotates every point's hue by `degrees`.
    pub fn rotate_hue(&mut self, degrees: f32) {
        for p in &mut self.points {
            p.color = p.color.rotate_hue(degrees);
        }
    }

    /// Replaces the point set with the preset's points and clears the selection.
    pub fn load_preset(&mut self, preset: &Preset) -> Result<(), PointSetError> {
        self.restore(preset.points())?;
        self.selected = None;
        Ok(())
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        self.points.clone()
    }

    /// Replaces the point set, e.g. from an undo snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), PointSetError> {
        check_len(snapshot.len())?;
        self.points = snapshot;
        self.selected = self.selected.filter(|&i| i < self.points.len());
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), PointSetError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(PointSetError::IndexOutOfRange { index, len: self.points.len() })
        }
    }
}

/// Lowest-index point within [`HIT_RADIUS`] of `position`.
pub fn find_nearest(points: &[GradientPoint], position: Position) -> Option<usize> {
    points.iter().position(|p| p.position.distance(position) <= HIT_RADIUS)
}

fn check_len(len: usize) -> Result<(), PointSetError> {
    if (MIN_POINTS..=MAX_POINTS).contains(&len) {
        Ok(())
    } else {
        Err(PointSetError::InvariantViolation { len })
    }
}
