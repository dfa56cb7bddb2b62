use crate::point::GradientPoint;

/// Height of the coarse `y` bands used to order stops.
const BAND: f32 = 0.2;
/// Blur radius per unit of peak intensity.
const BLUR_PER_INTENSITY: f32 = 30.0;

/// Static CSS approximation of the gradient.
///
/// Points are ordered bottom-to-top in coarse bands, then left-to-right, and
/// each becomes a conic stop at its angle around the image center. The blur
/// softens the hard conic edges; visual parity with the GPU blend is not a goal.
///
/// ```text
/// background: conic-gradient(from 90deg at 50% 50%, #ff0000 225.0deg, ...); filter: blur(30px);
/// ```
pub fn to_css(points: &[GradientPoint]) -> String {
    let mut ordered: Vec<&GradientPoint> = points.iter().collect();
    ordered.sort_by(|a, b| {
        band(a.position.y)
            .cmp(&band(b.position.y))
            .then(a.position.x.total_cmp(&b.position.x))
    });

    let stops: Vec<String> = ordered
        .iter()
        .map(|p| format!("{} {:.1}deg", p.color.to_hex(), stop_angle(p)))
        .collect();

    let peak = points.iter().map(|p| p.intensity).fold(0.0f32, f32::max);

    format!(
        "background: conic-gradient(from 90deg at 50% 50%, {}); filter: blur({}px);",
        stops.join(", "),
        format_px(peak * BLUR_PER_INTENSITY),
    )
}

fn band(y: f32) -> i32 {
    (y / BAND).floor() as i32
}

/// Angle of the point around the image center in degrees, `[0, 360)`,
/// rounded to one decimal.
fn stop_angle(p: &GradientPoint) -> f32 {
    let deg = (p.position.y - 0.5).atan2(p.position.x - 0.5).to_degrees();
    let deg = (deg.rem_euclid(360.0) * 10.0).round() / 10.0;
    if deg >= 360.0 { deg - 360.0 } else { deg }
}

fn format_px(v: f32) -> String {
    let v = (v * 100.0).round() / 100.0;
    if v.fract() == 0.0 { format!("{}", v as i64) } else { format!("{v}") }
}
