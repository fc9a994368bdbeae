/// Easing curve applied to normalized animation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic in, then out.
    InOutQuad,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic in, then out.
    #[default]
    InOutCubic,
    /// Sinusoidal in, then out.
    InOutSine,
}

impl Ease {
    /// Every curve, in declaration order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InOutSine,
    ];

    /// Eased value for normalized time `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = crate::foundation::math::clamp01(t);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    (1.0 - (std::f64::consts::PI * t).cos()) / 2.0
                }
            }
        }
    }

    /// Eased progress of an animation `elapsed_ms` into a run of `duration_ms`.
    pub fn at(self, elapsed_ms: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        self.apply(elapsed_ms / duration_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
