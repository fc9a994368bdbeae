use crate::foundation::core::{Point, Rect};

/// Clamp scalar value to normalized range `[0, 1]`; non-finite input maps to 0.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized position of `x` inside `[start, end]`, clamped. Degenerate windows step at `start`.
pub fn window_progress(x: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.abs() < f64::EPSILON {
        return if x >= start { 1.0 } else { 0.0 };
    }
    clamp01((x - start) / span)
}

/// Clamp a point into a rectangle. NaN coordinates collapse onto the rectangle origin.
pub fn clamp_point(p: Point, bounds: Rect) -> Point {
    fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
        if v.is_nan() { lo } else { v.clamp(lo, hi) }
    }
    Point::new(
        clamp_axis(p.x, bounds.x0, bounds.x1),
        clamp_axis(p.y, bounds.y0, bounds.y1),
    )
}

/// `|a - b| <= eps`.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
