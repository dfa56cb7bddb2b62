//! Static approximations of the gradient for use outside the renderer.
//!
//! CSS and SVG cannot run the blend kernel, so both are deliberately
//! approximate. The PNG export evaluates the kernel on the CPU.

mod css;
mod png;
mod svg;

pub use css::to_css;
pub use png::{render_image, write_png};
pub use svg::{to_svg, write_svg, SVG_SIZE, SVG_STOPS};

/// File name used for SVG downloads.
pub const SVG_FILE_NAME: &str = "mesh-gradient.svg";
/// File name used for PNG exports.
pub const PNG_FILE_NAME: &str = "mesh-gradient.png";
