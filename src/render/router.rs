use crate::{
    data::{outcome::Outcome, step::ScatterPhase},
    foundation::math::{clamp01, window_progress},
    render::context::RenderConfig,
    scene::graph::ClearPolicy,
};

/// Mutually exclusive render paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderPath {
    /// Geographic polygons only.
    Map,
    /// Polygons deforming toward their markers.
    Morphing,
    /// Settled scatter with keyed marker transitions.
    FullScatter,
    /// Settled scatter while the outcome changes.
    OutcomeTransition,
    /// Settled scatter while the analytical phase changes.
    PhaseSettle,
}

impl RenderPath {
    /// Stable tag used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Morphing => "morphing",
            Self::FullScatter => "full_scatter",
            Self::OutcomeTransition => "outcome_transition",
            Self::PhaseSettle => "phase_settle",
        }
    }
}

/// What the router needs to know about one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteInput {
    /// Interpolated morph progress.
    pub t: f64,
    /// Active outcome.
    pub outcome: Outcome,
    /// Active analytical phase.
    pub phase: ScatterPhase,
    /// Outcome and phase of the last rendered frame; `None` before the first frame.
    pub prev_outcome: Option<Outcome>,
    /// Phase of the last rendered frame.
    pub prev_phase: Option<ScatterPhase>,
}

/// Routing decision plus the derived sub-progress values the paths consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
    /// Selected path.
    pub path: RenderPath,
    /// Eased morph sub-progress; 0 on the map path, 1 once settled.
    pub morph_t: f64,
    /// Marker fade-in factor during morphing; 1 once settled.
    pub marker_fade: f64,
    /// Opacity of background and axis layers.
    pub backdrop_opacity: f64,
    /// Settled and the outcome differs from the last frame.
    pub outcome_changed: bool,
    /// Settled and the phase differs from the last frame.
    pub phase_changed: bool,
    /// How the scene is cleared before the path runs.
    pub clear: ClearPolicy,
    /// Fit and effect layers are (re)rendered.
    pub render_fit: bool,
}

/// Classifies frames by morph progress and the outcome/phase edge flags.
#[derive(Clone, Copy, Debug)]
pub struct PhaseRouter {
    cfg: RenderConfig,
}

impl PhaseRouter {
    /// Router over the given windows and thresholds.
    pub fn new(cfg: RenderConfig) -> Self {
        Self { cfg }
    }

    /// Eased sub-progress inside the morph window.
    pub fn morph_t(&self, t: f64) -> f64 {
        let raw = window_progress(t, self.cfg.morph_start, self.cfg.morph_end);
        clamp01(self.cfg.morph_ease.apply(raw))
    }

    /// Marker opacity factor for an eased sub-progress.
    pub fn marker_fade(&self, morph_t: f64) -> f64 {
        window_progress(
            morph_t,
            self.cfg.marker_fade_start,
            self.cfg.marker_fade_end,
        )
    }

    /// Classify one frame.
    ///
    /// Below the path threshold the map path wins. Once settled, an outcome change beats a phase
    /// change, and either beats the plain full-scatter path.
    pub fn route(&self, input: RouteInput) -> Route {
        let t = clamp01(input.t);
        let settled = t >= 1.0;
        let outcome_changed = settled && input.prev_outcome.is_some_and(|p| p != input.outcome);
        let phase_changed = settled && input.prev_phase.is_some_and(|p| p != input.phase);

        let path = if t < self.cfg.path_threshold {
            RenderPath::Map
        } else if outcome_changed {
            RenderPath::OutcomeTransition
        } else if phase_changed {
            RenderPath::PhaseSettle
        } else if !settled {
            RenderPath::Morphing
        } else {
            RenderPath::FullScatter
        };

        let (morph_t, marker_fade) = match path {
            RenderPath::Map => (0.0, 0.0),
            RenderPath::Morphing => {
                let m = self.morph_t(t);
                (m, self.marker_fade(m))
            }
            _ => (1.0, 1.0),
        };

        let clear = if outcome_changed || phase_changed || settled {
            ClearPolicy::RetainTransitionLayers
        } else {
            ClearPolicy::Full
        };

        Route {
            path,
            morph_t,
            marker_fade,
            backdrop_opacity: t,
            outcome_changed,
            phase_changed,
            clear,
            render_fit: settled,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/router.rs"]
mod tests;
