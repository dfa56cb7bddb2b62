mod app;
mod config;
mod editor;
mod export;
mod keymap;

use anyhow::Result;
use winit::dpi::LogicalSize;

use mesh_engine::device::GpuInit;
use mesh_engine::logging::{init_logging, LoggingConfig};
use mesh_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env();
    log::info!("starting mesh studio ({:?} packing)", config.packing);

    let runtime = RuntimeConfig {
        title: "mesh studio".to_string(),
        initial_size: LogicalSize::new(800.0, 800.0),
        ..Default::default()
    };
    // Hex colors are written to a linear-format surface unconverted.
    let gpu = GpuInit { prefer_srgb: false, ..Default::default() };

    Runtime::run(runtime, gpu, StudioApp::new(config))
}
