use crate::{
    animation::ease::Ease,
    data::{
        district::DistrictTable,
        outcome::Outcome,
        scatter::ScatterPoint,
        step::{HighlightMode, MarkerEmphasis, ScatterPhase},
    },
    foundation::{
        core::{Rect, Rgb8, Viewport},
        error::{MorphError, MorphResult},
    },
    geometry::index::GeometryIndex,
    scale::factory::Scales,
    scene::graph::JoinOpts,
};

/// Thresholds, sizes, and opacities used by the render paths.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Below this morph progress the map path is used.
    pub path_threshold: f64,
    /// Start of the morph window in raw progress.
    pub morph_start: f64,
    /// End of the morph window in raw progress.
    pub morph_end: f64,
    /// Curve applied to morph sub-progress.
    pub morph_ease: Ease,
    /// Marker fade window, in eased morph sub-progress.
    pub marker_fade_start: f64,
    /// End of the marker fade window.
    pub marker_fade_end: f64,
    /// Resting marker radius.
    pub marker_radius: f64,
    /// Marker radius while hovered.
    pub hover_radius: f64,
    /// Resting marker opacity.
    pub marker_opacity: f64,
    /// Opacity of markers or districts dimmed by a hint.
    pub dimmed_opacity: f64,
    /// Resting district polygon opacity.
    pub district_opacity: f64,
    /// Marker, fit-line, and effect transitions.
    pub transition_ms: f64,
    /// Curve for element transitions.
    pub transition_ease: Ease,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            path_threshold: 0.3,
            morph_start: 0.3,
            morph_end: 1.0,
            morph_ease: Ease::InOutCubic,
            marker_fade_start: 0.55,
            marker_fade_end: 0.85,
            marker_radius: 5.0,
            hover_radius: 8.0,
            marker_opacity: 0.75,
            dimmed_opacity: 0.15,
            district_opacity: 0.9,
            transition_ms: 500.0,
            transition_ease: Ease::InOutCubic,
        }
    }
}

impl RenderConfig {
    /// Reject windows outside `[0, 1]`, inverted windows, and non-positive radii.
    pub fn validate(&self) -> MorphResult<()> {
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !(unit(self.path_threshold) && unit(self.morph_start) && unit(self.morph_end)) {
            return Err(MorphError::validation(
                "morph thresholds must be within [0, 1]",
            ));
        }
        if self.morph_start > self.morph_end {
            return Err(MorphError::validation("morph_start must be <= morph_end"));
        }
        if !(unit(self.marker_fade_start)
            && unit(self.marker_fade_end)
            && self.marker_fade_start <= self.marker_fade_end)
        {
            return Err(MorphError::validation(
                "marker fade window must be an ordered range within [0, 1]",
            ));
        }
        if !(self.marker_radius > 0.0 && self.hover_radius > 0.0) {
            return Err(MorphError::validation("marker radii must be > 0"));
        }
        if !(unit(self.marker_opacity) && unit(self.dimmed_opacity) && unit(self.district_opacity))
        {
            return Err(MorphError::validation("opacities must be within [0, 1]"));
        }
        if !(self.transition_ms >= 0.0) {
            return Err(MorphError::validation("transition_ms must be >= 0"));
        }
        Ok(())
    }

    /// Join options for fading, transitioning joins.
    pub fn join_animated(&self) -> JoinOpts {
        JoinOpts::animated(self.transition_ms, self.transition_ease)
    }
}

/// Scene colors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Mita districts and markers.
    pub inside: Rgb8,
    /// Non-mita districts and markers.
    pub outside: Rgb8,
    /// District borders.
    pub border: Rgb8,
    /// Boundary outline.
    pub boundary: Rgb8,
    /// Background right of the threshold.
    pub region_inside: Rgb8,
    /// Background left of the threshold.
    pub region_outside: Rgb8,
    /// Axes and ticks.
    pub axis: Rgb8,
    /// Labels.
    pub text: Rgb8,
    /// Fitted lines.
    pub fit: Rgb8,
    /// Effect annotations.
    pub effect: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inside: Rgb8::new(196, 78, 82),
            outside: Rgb8::new(76, 114, 176),
            border: Rgb8::new(255, 255, 255),
            boundary: Rgb8::new(33, 33, 33),
            region_inside: Rgb8::new(250, 232, 230),
            region_outside: Rgb8::new(230, 238, 250),
            axis: Rgb8::new(110, 110, 110),
            text: Rgb8::new(40, 40, 40),
            fit: Rgb8::new(30, 30, 30),
            effect: Rgb8::new(221, 132, 82),
        }
    }
}

/// Everything a render path reads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// Render knobs.
    pub cfg: &'a RenderConfig,
    /// Colors.
    pub palette: &'a Palette,
    /// Logical space.
    pub viewport: &'a Viewport,
    /// Scales for this frame's zoom.
    pub scales: &'a Scales,
    /// District table.
    pub table: &'a DistrictTable,
    /// Boundary and bounds.
    pub geometry: &'a GeometryIndex,
    /// Every district with any valid outcome.
    pub scatter_all: &'a [ScatterPoint],
    /// Districts valid under `outcome`.
    pub filtered: &'a [ScatterPoint],
    /// Active outcome.
    pub outcome: Outcome,
    /// Active analytical phase.
    pub phase: ScatterPhase,
    /// Map highlight.
    pub highlight: HighlightMode,
    /// Marker emphasis hint.
    pub emphasis: Option<MarkerEmphasis>,
    /// Draw the threshold guide.
    pub show_guides: bool,
    /// District border opacity.
    pub border_opacity: f64,
    /// Raw morph progress.
    pub t: f64,
    /// Frame clock.
    pub now_ms: f64,
}

impl FrameContext<'_> {
    /// Plot area in alignment-group coordinates.
    pub fn plot_rect(&self) -> Rect {
        self.viewport.plot_rect()
    }

    /// Side color.
    pub fn fill_for(&self, mita: bool) -> Rgb8 {
        if mita {
            self.palette.inside
        } else {
            self.palette.outside
        }
    }

    /// Resting marker opacity after the emphasis hint.
    pub fn marker_opacity(&self, p: &ScatterPoint) -> f64 {
        let emphasized = match self.emphasis {
            None => true,
            Some(MarkerEmphasis::Inside) => p.mita,
            Some(MarkerEmphasis::Outside) => !p.mita,
            Some(MarkerEmphasis::Boundary) => self.geometry.is_boundary(p.id),
        };
        if emphasized {
            self.cfg.marker_opacity
        } else {
            self.cfg.dimmed_opacity
        }
    }
}

/// Primitive counts reported by a render path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Primitives produced.
    pub drawn: usize,
    /// Primitives omitted because geometry could not be projected.
    pub skipped: usize,
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
