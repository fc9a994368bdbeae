/// Smallest value a rate-like outcome must exceed to count as observed.
const MISSING_EPSILON: f64 = 1e-9;

/// The outcomes a scatter view can plot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Log equivalent household consumption.
    Consumption,
    /// Share of children with stunted growth.
    Stunting,
    /// Road network density.
    Roads,
}

impl Outcome {
    /// Every outcome, in axis-menu order.
    pub const ALL: [Outcome; 3] = [Outcome::Consumption, Outcome::Stunting, Outcome::Roads];

    /// Whether a raw table value counts as an observation for this outcome.
    ///
    /// Consumption and stunting record missing data as zero, so zero is rejected for them.
    /// A road density of zero is a real measurement.
    pub fn accepts(self, raw: Option<f64>) -> bool {
        let Some(v) = raw else {
            return false;
        };
        if !v.is_finite() {
            return false;
        }
        match self {
            Self::Consumption | Self::Stunting => v > MISSING_EPSILON,
            Self::Roads => v >= 0.0,
        }
    }

    /// Multiplier from table units to plotted units.
    pub fn display_factor(self) -> f64 {
        match self {
            Self::Stunting => 100.0,
            Self::Consumption | Self::Roads => 1.0,
        }
    }

    /// Y-axis title.
    pub fn axis_label(self) -> &'static str {
        match self {
            Self::Consumption => "Log household consumption",
            Self::Stunting => "Child stunting (%)",
            Self::Roads => "Road density",
        }
    }

    /// Human-readable plotted value, as shown in tooltips and effect labels.
    pub fn format_value(self, plotted: f64) -> String {
        match self {
            Self::Consumption => format!("{plotted:.2}"),
            Self::Stunting => format!("{plotted:.1}%"),
            Self::Roads => format!("{plotted:.1}"),
        }
    }

    /// Stable lowercase tag used in logs and output names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consumption => "consumption",
            Self::Stunting => "stunting",
            Self::Roads => "roads",
        }
    }
}

/// One optional value per outcome. Lookup is a total match over [`Outcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutcomeValues {
    /// Log household consumption.
    pub consumption: Option<f64>,
    /// Stunting rate as a fraction.
    pub stunting: Option<f64>,
    /// Road density.
    pub roads: Option<f64>,
}

impl OutcomeValues {
    /// Value for `outcome`.
    pub fn get(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Consumption => self.consumption,
            Outcome::Stunting => self.stunting,
            Outcome::Roads => self.roads,
        }
    }

    /// Replace the value for `outcome`.
    pub fn set(&mut self, outcome: Outcome, value: Option<f64>) {
        match outcome {
            Outcome::Consumption => self.consumption = value,
            Outcome::Stunting => self.stunting = value,
            Outcome::Roads => self.roads = value,
        }
    }

    /// Keep only accepted observations, converted to plotted units.
    pub fn to_plotted(&self) -> Self {
        let mut out = Self::default();
        for outcome in Outcome::ALL {
            let raw = self.get(outcome);
            if outcome.accepts(raw) {
                out.set(outcome, raw.map(|v| v * outcome.display_factor()));
            }
        }
        out
    }

    /// At least one outcome is present.
    pub fn any(&self) -> bool {
        Outcome::ALL.iter().any(|o| self.get(*o).is_some())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/outcome.rs"]
mod tests;
