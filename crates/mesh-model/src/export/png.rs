use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::ExportError;
use crate::kernel::{pixel_uv, shade};
use crate::point::GradientPoint;

/// Rasterizes the gradient with the CPU kernel.
///
/// This produces the same image the GPU renderer draws (dedicated packing), so
/// it stands in for reading back the swapchain.
pub fn render_image(points: &[GradientPoint], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = shade(points, pixel_uv(x, y, width, height));
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([q(r), q(g), q(b), q(a)])
    })
}

/// Renders and writes a PNG to `path`.
pub fn write_png(
    path: impl AsRef<Path>,
    points: &[GradientPoint],
    width: u32,
    height: u32,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let img = render_image(points, width, height);
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("wrote {}x{} png to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::point::Position;

    #[test]
    fn image_is_opaque_and_oriented_bottom_up() {
        let points = [
            GradientPoint::new(Position::new(0.5, 0.95), Rgb::new(1.0, 0.0, 0.0)).with_bend(6.0),
            GradientPoint::new(Position::new(0.5, 0.05), Rgb::new(0.0, 0.0, 1.0)).with_bend(6.0),
        ];
        let img = render_image(&points, 16, 16);
        assert_eq!(img.dimensions(), (16, 16));
        assert!(img.pixels().all(|p| p.0[3] == 255));

        // Row 0 is the top of the image, i.e. high `y`: red.
        let top = img.get_pixel(8, 0).0;
        let bottom = img.get_pixel(8, 15).0;
        assert!(top[0] > top[2]);
        assert!(bottom[2] > bottom[0]);
    }
}
