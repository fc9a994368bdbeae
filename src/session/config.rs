use std::io::Read;

use crate::{
    animation::driver::DriverTiming,
    foundation::{
        core::Viewport,
        error::{MorphError, MorphResult},
    },
    geometry::index::DEFAULT_VERTEX_TOLERANCE,
    render::context::{Palette, RenderConfig},
    scale::factory::FramingOpts,
};

/// Geometry and framing knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Vertex match tolerance in degrees for boundary detection.
    pub vertex_tolerance: f64,
    /// Country framing padding, as a fraction of the data bounds.
    pub context_padding: f64,
    /// Inset of both map framings in logical units.
    pub map_padding: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            vertex_tolerance: DEFAULT_VERTEX_TOLERANCE,
            context_padding: 0.2,
            map_padding: 12.0,
        }
    }
}

impl GeometryConfig {
    /// Framing options for the scale factory.
    pub fn framing(&self) -> FramingOpts {
        FramingOpts {
            context_padding: self.context_padding,
            map_padding: self.map_padding,
        }
    }
}

/// Everything a [`SceneController`](crate::session::controller::SceneController) is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Logical space and host scale.
    pub viewport: Viewport,
    /// Render-path thresholds, sizes, opacities, and element transitions.
    pub morph: RenderConfig,
    /// Durations of the three continuous values.
    pub timing: DriverTiming,
    /// Boundary detection and framing.
    pub geometry: GeometryConfig,
    /// Colors.
    pub palette: Palette,
}

impl SceneConfig {
    /// Parse a partial JSON config over the defaults and validate it.
    pub fn from_json_reader(reader: impl Read) -> MorphResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate every section.
    pub fn validate(&self) -> MorphResult<()> {
        self.viewport.validate()?;
        self.morph.validate()?;

        let t = &self.timing;
        if [t.morph_ms, t.zoom_ms, t.border_ms]
            .iter()
            .any(|d| !d.is_finite() || *d < 0.0)
        {
            return Err(MorphError::validation("timing durations must be >= 0"));
        }

        let g = &self.geometry;
        if !(g.vertex_tolerance.is_finite() && g.vertex_tolerance > 0.0) {
            return Err(MorphError::validation("vertex_tolerance must be > 0"));
        }
        if !(g.context_padding.is_finite() && g.context_padding >= 0.0) {
            return Err(MorphError::validation("context_padding must be >= 0"));
        }
        if !(g.map_padding.is_finite() && g.map_padding >= 0.0) {
            return Err(MorphError::validation("map_padding must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
