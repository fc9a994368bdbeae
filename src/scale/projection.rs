use crate::{
    data::district::LonLat,
    foundation::core::{Point, Rect},
    geometry::index::GeoBounds,
};

/// Latitude beyond which Mercator is treated as undefined.
const MAX_LATITUDE: f64 = 85.0;

/// Unscaled spherical Mercator coordinates (radians, y grows northward).
pub fn mercator(p: LonLat) -> Option<(f64, f64)> {
    if !p.lon.is_finite() || !p.lat.is_finite() || p.lat.abs() > MAX_LATITUDE {
        return None;
    }
    let x = p.lon.to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + p.lat.to_radians() / 2.0)
        .tan()
        .ln();
    y.is_finite().then_some((x, y))
}

/// Mercator projection framed onto the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Pixels per Mercator unit.
    pub scale: f64,
    /// Mercator coordinate placed at the plot center.
    pub center: (f64, f64),
    /// Plot rectangle the projection is centered in.
    pub frame: Rect,
}

impl Projection {
    /// Fit `bounds` inside `frame`, leaving `padding` pixels on each side.
    pub fn fit(bounds: GeoBounds, frame: Rect, padding: f64) -> Option<Self> {
        let (x0, y0) = mercator(bounds.min)?;
        let (x1, y1) = mercator(bounds.max)?;
        let avail_w = (frame.width() - 2.0 * padding).max(1.0);
        let avail_h = (frame.height() - 2.0 * padding).max(1.0);
        let span_x = (x1 - x0).abs();
        let span_y = (y1 - y0).abs();
        let scale = match (span_x > f64::EPSILON, span_y > f64::EPSILON) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => return None,
        };
        Some(Self {
            scale,
            center: ((x0 + x1) / 2.0, (y0 + y1) / 2.0),
            frame,
        })
    }

    /// Blend two framings. Scale interpolates geometrically so zoom speed feels uniform.
    pub fn blend(a: &Self, b: &Self, t: f64) -> Self {
        let t = crate::foundation::math::clamp01(t);
        let scale = (a.scale.ln() + (b.scale.ln() - a.scale.ln()) * t).exp();
        Self {
            scale,
            center: (
                a.center.0 + (b.center.0 - a.center.0) * t,
                a.center.1 + (b.center.1 - a.center.1) * t,
            ),
            frame: b.frame,
        }
    }

    /// Project a coordinate into plot space. `None` means the point contributes nothing.
    pub fn project(&self, p: LonLat) -> Option<Point> {
        let (x, y) = mercator(p)?;
        let c = self.frame.center();
        let px = c.x + (x - self.center.0) * self.scale;
        let py = c.y - (y - self.center.1) * self.scale;
        (px.is_finite() && py.is_finite()).then(|| Point::new(px, py))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/projection.rs"]
mod tests;
