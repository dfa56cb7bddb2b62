use std::path::Path;

use crate::error::ExportError;
use crate::kernel::{DISTANCE_BIAS, DISTANCE_SCALE};
use crate::point::GradientPoint;

/// Edge length of the exported document in px.
pub const SVG_SIZE: u32 = 1200;
/// Stops per radial gradient.
pub const SVG_STOPS: usize = 32;

/// Static SVG approximation of the gradient.
///
/// Each point becomes a radial gradient centered on it whose opacity follows
/// the kernel's inverse-power falloff, evaluated radially from that point
/// alone. The circles are multiplied together over a white background.
pub fn to_svg(points: &[GradientPoint]) -> String {
    let size = SVG_SIZE as f32;
    let mut defs = String::new();
    let mut body = String::new();

    for (i, p) in points.iter().enumerate() {
        let cx = p.position.x * size;
        let cy = (1.0 - p.position.y) * size;
        let r = radius(p);
        let hex = p.color.to_hex();

        defs.push_str(&format!(
            "    <radialGradient id=\"point-{i}\" gradientUnits=\"userSpaceOnUse\" cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\">\n"
        ));
        for k in 0..SVG_STOPS {
            let t = k as f32 / (SVG_STOPS - 1) as f32;
            let opacity = stop_opacity(p, t * r / size);
            defs.push_str(&format!(
                "      <stop offset=\"{:.2}%\" stop-color=\"{hex}\" stop-opacity=\"{opacity:.4}\"/>\n",
                t * 100.0,
            ));
        }
        defs.push_str("    </radialGradient>\n");

        body.push_str(&format!(
            "    <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"url(#point-{i})\"/>\n"
        ));
    }

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_SIZE}\" height=\"{SVG_SIZE}\" viewBox=\"0 0 {SVG_SIZE} {SVG_SIZE}\">\n"
    ));
    svg.push_str("  <defs>\n");
    svg.push_str(&defs);
    svg.push_str("  </defs>\n");
    svg.push_str(&format!("  <rect width=\"{SVG_SIZE}\" height=\"{SVG_SIZE}\" fill=\"#ffffff\"/>\n"));
    svg.push_str("  <g style=\"mix-blend-mode: multiply; isolation: isolate\">\n");
    svg.push_str(&body);
    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");
    svg
}

/// Writes [`to_svg`] output to `path`.
pub fn write_svg(path: impl AsRef<Path>, points: &[GradientPoint]) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, to_svg(points))
        .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    log::info!("wrote svg with {} points to {}", points.len(), path.display());
    Ok(())
}

/// Radius of a point's radial falloff in document px.
fn radius(p: &GradientPoint) -> f32 {
    SVG_SIZE as f32 * 0.5 * p.elongation
}

/// Opacity at normalized distance `d` from the point center: the kernel weight
/// relative to its value at the center, scaled by intensity (capped at 1).
fn stop_opacity(p: &GradientPoint, d: f32) -> f32 {
    let falloff = (DISTANCE_BIAS / (d * DISTANCE_SCALE + DISTANCE_BIAS)).powf(p.bend);
    (p.intensity.min(1.0) * falloff).clamp(0.0, 1.0)
}
