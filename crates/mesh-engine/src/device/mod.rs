//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue, configures the surface and
//! hands out one encoder + view per frame.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
