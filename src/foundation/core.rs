use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Plot margins in logical units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot, holding the x-axis title.
    pub bottom: f64,
    /// Space left of the plot, holding the y-axis title.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 60.0,
            left: 70.0,
        }
    }
}

/// Fixed logical coordinate space, uniformly scaled by the host to its physical size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Margins around the plot area.
    pub margin: Margin,
    /// Physical pixels per logical unit.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            margin: Margin::default(),
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Reject non-positive scales, negative margins, and margins that swallow the plot.
    pub fn validate(&self) -> MorphResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(MorphError::validation("viewport scale must be > 0"));
        }
        let m = self.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(MorphError::validation("viewport margins must be >= 0"));
        }
        if !(self.inner_width() > 0.0 && self.inner_height() > 0.0) {
            return Err(MorphError::validation(
                "viewport must leave a positive plot area inside its margins",
            ));
        }
        Ok(())
    }

    /// Plot width inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Plot height inside the margins.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Plot area in alignment-group coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.inner_width(), self.inner_height())
    }

    /// Logical-to-physical transform applied by the host surface.
    pub fn surface_transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Offset of the plot frame inside the logical space.
    pub fn plot_transform(&self) -> Affine {
        Affine::translate((self.margin.left, self.margin.top))
    }

    /// Surface size in whole physical pixels, at least 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale).round().max(1.0) as u32,
            (self.height * self.scale).round().max(1.0) as u32,
        )
    }
}

/// Straight (non-premultiplied) RGB color used for fills and strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form used in SVG output.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
