//! Mesh gradient model.
//!
//! Everything here is independent of the GPU: the point set and its invariants,
//! undo history, the uniform block layout consumed by the mesh shader, a CPU
//! mirror of the blend kernel, and the CSS/SVG/PNG exporters.

pub mod color;
pub mod error;
pub mod export;
pub mod history;
pub mod kernel;
pub mod packing;
pub mod point;
pub mod presets;
pub mod state;

pub use color::Rgb;
pub use error::{ExportError, PointSetError};
pub use history::History;
pub use packing::{pack, MeshUniforms, PackingMode};
pub use point::{GradientPoint, PointField, Position};
pub use presets::{find_preset, Preset, PRESETS};
pub use state::{GradientState, Snapshot, HIT_RADIUS, MAX_POINTS, MIN_POINTS};
