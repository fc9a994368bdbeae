/// Linear mapping from a data domain onto a pixel range.
///
/// With `clamp` set, every input (including infinities) lands inside the range. A degenerate
/// domain maps everything to the middle of the range instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    /// Input interval `(d0, d1)`.
    pub domain: (f64, f64),
    /// Output interval `(r0, r1)`; may be inverted.
    pub range: (f64, f64),
    /// Keep outputs inside the range.
    pub clamp: bool,
}

impl LinearScale {
    /// Unclamped scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Same scale with clamping on.
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// The domain has no usable span.
    pub fn is_degenerate(&self) -> bool {
        let span = self.domain.1 - self.domain.0;
        !span.is_finite() || span.abs() < f64::EPSILON
    }

    /// Map `x` to the range. NaN maps to the range start.
    pub fn apply(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        if x.is_nan() {
            return r0;
        }
        let (d0, d1) = self.domain;
        let mut t = (x - d0) / (d1 - d0);
        if self.clamp || !t.is_finite() {
            t = t.clamp(0.0, 1.0);
        }
        r0 + (r1 - r0) * t
    }

    /// Round-number ticks covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if hi - lo < f64::EPSILON {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        let start = (lo / step).ceil() as i64;
        let end = (hi / step).floor() as i64;
        (start..=end).map(|i| i as f64 * step).collect()
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let mult = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    mult * power
}

#[cfg(test)]
#[path = "../../tests/unit/scale/linear.rs"]
mod tests;
