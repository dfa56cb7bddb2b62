//! Mesh gradient engine crate.
//!
//! This crate owns the platform + GPU runtime pieces (device, window loop,
//! input) and the two renderers of the editor: the mesh gradient itself and
//! the point-handle overlay drawn on top of it.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod overlay;
pub mod render;

mod error;

pub use error::{RenderError, ShaderStage};
