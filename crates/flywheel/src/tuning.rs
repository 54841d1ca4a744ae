use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_SPEED: f64 = 12.0;
pub const DEFAULT_RELEASE_THRESHOLD: f64 = 0.4;
pub const DEFAULT_MIN_DURATION: f64 = 1.0;
pub const DEFAULT_MAX_DURATION: f64 = 5.0;
pub const DEFAULT_SAMPLE_WINDOW_MS: u64 = 160;
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// Physics knobs for a wheel. Velocities are rad/s, durations seconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    /// Release velocities are clamped to `±max_speed`.
    pub max_speed: f64,
    /// Releases slower than this are taps and settle in place.
    pub release_threshold: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    /// Drag samples older than this are dropped from the velocity estimate.
    pub sample_window_ms: u64,
    pub min_samples: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            release_threshold: DEFAULT_RELEASE_THRESHOLD,
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            sample_window_ms: DEFAULT_SAMPLE_WINDOW_MS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("max_speed must be positive, got {0}")]
    MaxSpeed(f64),
    #[error("release_threshold must not be negative, got {0}")]
    ReleaseThreshold(f64),
    #[error("settle durations must satisfy 0 < min ({min}) <= max ({max})")]
    Durations { min: f64, max: f64 },
    #[error("sample_window_ms must be positive")]
    SampleWindow,
    #[error("min_samples must be at least 2, got {0}")]
    MinSamples(usize),
}

impl Tuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(TuningError::MaxSpeed(self.max_speed));
        }
        if !(self.release_threshold.is_finite() && self.release_threshold >= 0.0) {
            return Err(TuningError::ReleaseThreshold(self.release_threshold));
        }
        if !(self.min_duration > 0.0 && self.min_duration <= self.max_duration)
            || !self.max_duration.is_finite()
        {
            return Err(TuningError::Durations {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        if self.sample_window_ms == 0 {
            return Err(TuningError::SampleWindow);
        }
        if self.min_samples < 2 {
            return Err(TuningError::MinSamples(self.min_samples));
        }
        Ok(())
    }

    pub fn sample_window(&self) -> Duration {
        Duration::from_millis(self.sample_window_ms)
    }

    pub fn clamp_velocity(&self, velocity: f64) -> f64 {
        velocity.clamp(-self.max_speed, self.max_speed)
    }

    /// Time a throw at `speed` takes to coast to a stop; linear between the
    /// two configured durations.
    pub fn settle_duration(&self, speed: f64) -> f64 {
        let ratio = speed.abs().min(self.max_speed) / self.max_speed;
        self.min_duration + (self.max_duration - self.min_duration) * ratio
    }
}

/// Derived once per throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinParameters {
    /// Signed, already clamped.
    pub initial_velocity: f64,
    pub duration: f64,
    /// Magnitude; always applied against the velocity's sign.
    pub deceleration: f64,
}

impl SpinParameters {
    /// Turns a raw release velocity into a throw, or `None` when the release
    /// should settle in place instead.
    pub fn from_release(velocity: f64, tuning: &Tuning) -> Option<Self> {
        if velocity.is_nan() {
            return None;
        }
        let initial_velocity = tuning.clamp_velocity(velocity);
        if initial_velocity == 0.0 || initial_velocity.abs() < tuning.release_threshold {
            return None;
        }

        let duration = tuning.settle_duration(initial_velocity);
        Some(Self {
            initial_velocity,
            duration,
            deceleration: initial_velocity.abs() / duration,
        })
    }
}
