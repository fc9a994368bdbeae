use std::io::Read;

use crate::{
    data::outcome::Outcome,
    foundation::error::{MorphError, MorphResult},
};

/// Analytical layer shown on top of the scatter view.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScatterPhase {
    /// Markers only.
    #[default]
    Dots,
    /// Per-side least-squares lines.
    OlsFit,
    /// Group means and their difference.
    NaiveEffect,
    /// Fitted-line gap at the boundary.
    ControlledEffect,
}

impl ScatterPhase {
    /// Whether fitted lines are drawn in this phase.
    pub fn shows_fit(self) -> bool {
        !matches!(self, Self::Dots)
    }
}

/// Named zoom levels. The projection interpolates continuously between them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    /// Whole-country framing.
    #[default]
    Country,
    /// Framing around districts near the boundary.
    MitaRegion,
}

impl ZoomLevel {
    /// Zoom blend target.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Country => 0.0,
            Self::MitaRegion => 1.0,
        }
    }
}

/// District highlight mode on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// All districts at full weight.
    #[default]
    None,
    /// Outline districts that touch the other side.
    Boundary,
    /// Dim districts outside the mita.
    MitaOnly,
    /// Dim districts inside the mita.
    NonmitaOnly,
}

/// Which markers stay at full weight in the scatter view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerEmphasis {
    /// Markers inside the mita.
    Inside,
    /// Markers outside the mita.
    Outside,
    /// Markers for boundary districts.
    Boundary,
}

/// One narrative step. Every field is an independent target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Target morph progress in `[0, 1]`.
    pub morph_progress: f64,
    /// Outcome on the y axis.
    pub outcome: Outcome,
    /// District borders visible.
    #[serde(default)]
    pub show_districts: bool,
    /// Analytical overlay.
    #[serde(default)]
    pub scatter_phase: ScatterPhase,
    /// Projection framing.
    #[serde(default)]
    pub zoom: ZoomLevel,
    /// Map highlight; `None` means no highlight.
    #[serde(default)]
    pub highlight: Option<HighlightMode>,
    /// Marker emphasis; `None` keeps every marker at full weight.
    #[serde(default)]
    pub emphasis: Option<MarkerEmphasis>,
    /// Threshold guide line at distance zero.
    #[serde(default)]
    pub show_guides: Option<bool>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            morph_progress: 0.0,
            outcome: Outcome::Consumption,
            show_districts: true,
            scatter_phase: ScatterPhase::Dots,
            zoom: ZoomLevel::Country,
            highlight: None,
            emphasis: None,
            show_guides: None,
        }
    }
}

impl Step {
    /// Reject a morph progress outside `[0, 1]`.
    pub fn validate(&self) -> MorphResult<()> {
        if !self.morph_progress.is_finite() || !(0.0..=1.0).contains(&self.morph_progress) {
            return Err(MorphError::validation(
                "step morph_progress must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Parse and validate a JSON array of steps. Errors name the offending step index.
pub fn load_steps(reader: impl Read) -> MorphResult<Vec<Step>> {
    let steps: Vec<Step> = serde_json::from_reader(reader)?;
    for (idx, step) in steps.iter().enumerate() {
        step.validate()
            .map_err(|e| MorphError::validation(format!("step {idx}: {e}")))?;
    }
    Ok(steps)
}

#[cfg(test)]
#[path = "../../tests/unit/data/step.rs"]
mod tests;
