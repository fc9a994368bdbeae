//! Continuous scene values (morph progress, zoom, border opacity).
//!
//! Each value owns one [`AnimationHandle`]. The host calls [`AnimationDriver::tick`] once per
//! display refresh; between ticks nothing runs. Restarting a handle always cancels the run in
//! flight, captures the value it had reached, and schedules the new run from there.

use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::error::{MorphError, MorphResult},
};

/// Owned interpolation loop for one scalar.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    name: &'static str,
    value: f64,
    run: Option<Tween<f64>>,
    duration_ms: f64,
    ease: Ease,
    generation: u64,
    disposed: bool,
}

impl AnimationHandle {
    /// Idle handle resting at `initial`. `name` tags log lines and errors.
    pub fn new(name: &'static str, initial: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            name,
            value: initial,
            run: None,
            duration_ms,
            ease,
            generation: 0,
            disposed: false,
        }
    }

    /// Animate toward `target` starting at `now_ms`.
    pub fn start(&mut self, target: f64, now_ms: f64) -> MorphResult<()> {
        if self.disposed {
            return Err(MorphError::Disposed);
        }
        if !target.is_finite() {
            return Err(MorphError::animation(format!(
                "{} target must be finite",
                self.name
            )));
        }
        if self.target() == target {
            return Ok(());
        }

        self.tick(now_ms);
        self.cancel();
        if self.value == target {
            return Ok(());
        }
        self.generation += 1;
        self.run = Some(Tween {
            from: self.value,
            to: target,
            start_ms: now_ms,
            duration_ms: self.duration_ms,
            ease: self.ease,
        });
        tracing::trace!(
            handle = self.name,
            from = self.value,
            to = target,
            "animation started"
        );
        Ok(())
    }

    /// Stop the run in flight, keeping the last sampled value. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.run.take().is_some();
        if cancelled {
            self.generation += 1;
        }
        cancelled
    }

    /// Jump straight to `value` without animating.
    pub fn jump(&mut self, value: f64) {
        self.cancel();
        self.value = value;
    }

    /// Advance the loop to `now_ms` and return the fresh value.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if let Some(run) = &self.run {
            let (v, done) = run.sample(now_ms);
            self.value = v;
            if done {
                self.run = None;
            }
        }
        self.value
    }

    /// Last sampled value.
    pub fn current_value(&self) -> f64 {
        self.value
    }

    /// Value the handle is heading to (its current value when idle).
    pub fn target(&self) -> f64 {
        self.run.as_ref().map_or(self.value, |r| r.to)
    }

    /// A run is in flight.
    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Bumped on every start and cancel; a stale generation means the loop was superseded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel any run and refuse further starts.
    pub fn dispose(&mut self) {
        self.cancel();
        self.disposed = true;
    }

    /// Whether [`AnimationHandle::dispose`] was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Durations and curve for the three continuous values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DriverTiming {
    /// Morph progress run length.
    pub morph_ms: f64,
    /// Zoom run length.
    pub zoom_ms: f64,
    /// Border opacity run length.
    pub border_ms: f64,
    /// Curve shared by all three handles.
    pub ease: Ease,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            morph_ms: 1500.0,
            zoom_ms: 1200.0,
            border_ms: 600.0,
            ease: Ease::InOutCubic,
        }
    }
}

/// Values read by the render pass for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverSample {
    /// Morph progress `t` in `[0, 1]`.
    pub morph: f64,
    /// Zoom blend, 0 = country, 1 = mita region.
    pub zoom: f64,
    /// District border opacity.
    pub border: f64,
}

/// Exactly three handles, one per continuous scene value.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    /// Drives the map-to-scatter progress.
    pub morph: AnimationHandle,
    /// Drives the projection zoom blend.
    pub zoom: AnimationHandle,
    /// Drives the district border opacity.
    pub border: AnimationHandle,
}

impl AnimationDriver {
    /// All three handles at rest on `initial`.
    pub fn new(timing: DriverTiming, initial: DriverSample) -> Self {
        Self {
            morph: AnimationHandle::new("morph", initial.morph, timing.morph_ms, timing.ease),
            zoom: AnimationHandle::new("zoom", initial.zoom, timing.zoom_ms, timing.ease),
            border: AnimationHandle::new("border", initial.border, timing.border_ms, timing.ease),
        }
    }

    /// Advance every handle to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> DriverSample {
        DriverSample {
            morph: self.morph.tick(now_ms),
            zoom: self.zoom.tick(now_ms),
            border: self.border.tick(now_ms),
        }
    }

    /// Some handle is still running.
    pub fn any_active(&self) -> bool {
        self.morph.is_active() || self.zoom.is_active() || self.border.is_active()
    }

    /// Dispose all three handles.
    pub fn dispose(&mut self) {
        self.morph.dispose();
        self.zoom.dispose();
        self.border.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
