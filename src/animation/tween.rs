use crate::{animation::ease::Ease, foundation::core::Point};

/// Linear interpolation between two values.
pub trait Lerp: Sized {
    /// Value `t` of the way from `a` to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// A single timed run from one value to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    /// Start value.
    pub from: T,
    /// End value.
    pub to: T,
    /// Clock time the run starts.
    pub start_ms: f64,
    /// Run length; zero or negative finishes immediately.
    pub duration_ms: f64,
    /// Curve applied to normalized time.
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Sampled value at `now_ms` and whether the run has finished.
    pub fn sample(&self, now_ms: f64) -> (T, bool) {
        let elapsed = now_ms - self.start_ms;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return (self.to.clone(), true);
        }
        let t = self.ease.at(elapsed, self.duration_ms);
        (T::lerp(&self.from, &self.to, t), false)
    }
}

/// A value that is either at rest or running a tween toward its target.
#[derive(Clone, Debug, PartialEq)]
pub struct Animated<T> {
    current: T,
    target: T,
    tween: Option<Tween<T>>,
}

impl<T> Animated<T>
where
    T: Lerp + Clone + PartialEq,
{
    /// At rest on `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            target: value,
            tween: None,
        }
    }

    /// Value as of the last advance.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Where the value is heading; equals the current value at rest.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// A tween is in flight.
    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Jump to `value`, dropping any running tween.
    pub fn set(&mut self, value: T) {
        self.tween = None;
        self.current = value.clone();
        self.target = value;
    }

    /// Start a tween from the current value. Re-targeting the value already being approached
    /// keeps the running tween.
    pub fn transition_to(&mut self, value: T, now_ms: f64, duration_ms: f64, ease: Ease) {
        if value == self.target {
            return;
        }
        self.target = value.clone();
        if duration_ms <= 0.0 {
            self.set(value);
            return;
        }
        self.tween = Some(Tween {
            from: self.current.clone(),
            to: value,
            start_ms: now_ms,
            duration_ms,
            ease,
        });
    }

    /// Advance to `now_ms`. Returns true when a tween finished on this call.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let Some(tween) = &self.tween else {
            return false;
        };
        let (value, done) = tween.sample(now_ms);
        self.current = value;
        if done {
            self.tween = None;
        }
        done
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
