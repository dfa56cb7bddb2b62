//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources. CPU geometry is in logical pixels
//! (top-left origin, +Y down); shaders convert to NDC.

mod common;
mod ctx;

pub mod handles;
pub mod mesh;
pub mod program;

pub use ctx::{RenderCtx, RenderTarget};
pub use handles::HandleRenderer;
pub use mesh::{MeshRenderer, MeshRendererConfig, RendererResources};
pub use program::{ProgramState, ShaderProgram};
