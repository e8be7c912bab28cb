//! Volume fades for start, pause and resume
//!
//! A `Fade` is a ramp of the output volume between two levels over a fixed
//! duration. The engine owns at most one; starting a new fade replaces the
//! old one, so fades never stack.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::time::{Duration, Instant};

/// Fade curve shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FadeCurve {
    /// Straight ramp
    #[default]
    Linear,

    /// Slow start, fast middle, slow end
    SCurve,

    /// Quarter-sine, rises quickly then levels off
    EqualPower,
}

impl FadeCurve {
    /// Shape a normalized fade position (0.0-1.0) into a 0.0-1.0 ramp factor
    #[inline]
    pub fn shape(&self, position: f32) -> f32 {
        let t = position.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::SCurve => (1.0 - (PI * t).cos()) * 0.5,
            FadeCurve::EqualPower => (t * PI * 0.5).sin(),
        }
    }

    /// Get a human-readable name for the curve
    pub fn display_name(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "Linear",
            FadeCurve::SCurve => "S-Curve",
            FadeCurve::EqualPower => "Equal Power",
        }
    }
}

/// What happens to the output once a fade completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCompletion {
    /// Leave the output running at the target volume
    Continue,

    /// Pause the output (fade-out before pause)
    Pause,
}

/// In-flight volume ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    curve: FadeCurve,
    completion: FadeCompletion,
}

impl Fade {
    /// Create a fade-in from silence to `target`
    pub fn fade_in(target: f32, now: Instant, duration: Duration, curve: FadeCurve) -> Self {
        Self {
            from: 0.0,
            to: target,
            started_at: now,
            duration,
            curve,
            completion: FadeCompletion::Continue,
        }
    }

    /// Create a fade-out from `start` to silence that pauses on completion
    pub fn fade_out(start: f32, now: Instant, duration: Duration, curve: FadeCurve) -> Self {
        Self {
            from: start,
            to: 0.0,
            started_at: now,
            duration,
            curve,
            completion: FadeCompletion::Pause,
        }
    }

    /// Whether this fade ramps volume up
    pub fn is_fade_in(&self) -> bool {
        self.completion == FadeCompletion::Continue
    }

    /// Action to take once the fade finishes
    pub fn completion(&self) -> FadeCompletion {
        self.completion
    }

    /// Target volume
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Normalized progress at `now` (0.0-1.0)
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Volume at `now`
    pub fn level_at(&self, now: Instant) -> f32 {
        let factor = self.curve.shape(self.progress(now));
        (self.from + (self.to - self.from) * factor).clamp(0.0, 1.0)
    }

    /// Whether the fade has reached its target at `now`
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
