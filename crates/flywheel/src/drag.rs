//! Turns pointer positions around the wheel center into a continuous rotation.
//!
//! `atan2` readings wrap at ±π, so a drag that circles the wheel would jump
//! by a full turn each time it crosses the wrap line. The tracker instead
//! accumulates the shortest signed delta between consecutive readings, which
//! keeps the total continuous over any number of turns. The same unwrapped
//! values feed a short sliding window used to estimate the release velocity.

use crate::angle;
use crate::geometry::Point;
use crate::tuning::{DEFAULT_MIN_SAMPLES, DEFAULT_SAMPLE_WINDOW_MS, Tuning};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Monotonic timestamp; only differences matter.
    pub at: Duration,
    /// Unwrapped rotation since the drag began.
    pub angle: f64,
}

#[derive(Debug, Clone)]
pub struct DragTracker {
    unwrapped_total: f64,
    last_wrapped: f64,
    samples: VecDeque<DragSample>,
    window: Duration,
    min_samples: usize,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_SAMPLE_WINDOW_MS),
            DEFAULT_MIN_SAMPLES,
        )
    }
}

impl DragTracker {
    pub fn new(window: Duration, min_samples: usize) -> Self {
        Self {
            unwrapped_total: 0.0,
            last_wrapped: 0.0,
            samples: VecDeque::new(),
            window,
            min_samples: min_samples.max(2),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.sample_window(), tuning.min_samples)
    }

    pub fn begin(&mut self, pointer: Point, center: Point, now: Duration) {
        self.begin_bearing(pointer.bearing_from(center), now);
    }

    /// Starts a drag from a raw `atan2` reading.
    pub fn begin_bearing(&mut self, bearing: f64, now: Duration) {
        self.unwrapped_total = 0.0;
        self.last_wrapped = bearing;
        self.samples.clear();
        self.samples.push_back(DragSample {
            at: now,
            angle: 0.0,
        });
    }

    pub fn update(&mut self, pointer: Point, center: Point, now: Duration) -> f64 {
        self.update_bearing(pointer.bearing_from(center), now)
    }

    /// Feeds a raw `atan2` reading and returns the unwrapped total.
    pub fn update_bearing(&mut self, bearing: f64, now: Duration) -> f64 {
        self.unwrapped_total += angle::shortest_delta(self.last_wrapped, bearing);
        self.last_wrapped = bearing;

        self.samples.push_back(DragSample {
            at: now,
            angle: self.unwrapped_total,
        });
        self.evict_stale(now);

        self.unwrapped_total
    }

    fn evict_stale(&mut self, now: Duration) {
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        while self.samples.len() > self.min_samples
            && self.samples.front().is_some_and(|s| s.at < cutoff)
        {
            self.samples.pop_front();
        }
    }

    pub fn unwrapped_total(&self) -> f64 {
        self.unwrapped_total
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &DragSample> {
        self.samples.iter()
    }

    /// Angular velocity in rad/s between the oldest and newest retained
    /// samples. `None` without two samples; zero when no time has passed.
    pub fn release_velocity(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        let (first, last) = (self.samples.front()?, self.samples.back()?);
        let elapsed = last.at.saturating_sub(first.at).as_secs_f64();
        if elapsed > 0.0 {
            Some((last.angle - first.angle) / elapsed)
        } else {
            Some(0.0)
        }
    }

    pub fn clear(&mut self) {
        self.unwrapped_total = 0.0;
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn unwrapping_is_continuous_across_the_seam() {
        let mut tracker = DragTracker::default();
        tracker.begin_bearing(0.1, ms(0));

        let mut previous = tracker.unwrapped_total();
        for (i, raw) in [3.0, -3.0, 0.2].into_iter().enumerate() {
            let total = tracker.update_bearing(raw, ms(10 * (i as u64 + 1)));
            assert!((total - previous).abs() <= PI, "jump {previous} -> {total}");
            previous = total;
        }
        assert!((previous - 0.1).abs() < 1e-12);
    }

    #[test]
    fn full_turns_accumulate() {
        let mut tracker = DragTracker::default();
        let center = Point::new(0.0, 0.0);
        tracker.begin(Point::new(1.0, 0.0), center, ms(0));

        // three clockwise turns in 45 degree steps
        let steps = 24;
        for k in 1..=steps {
            let a = k as f64 * TAU / 8.0;
            tracker.update(center.offset(a, 50.0), center, ms(k as u64 * 5));
        }
        assert!((tracker.unwrapped_total() - 3.0 * TAU).abs() < 1e-9);
    }

    #[test]
    fn stale_samples_are_evicted_but_two_remain() {
        let mut tracker = DragTracker::default();
        tracker.begin_bearing(0.0, ms(0));
        tracker.update_bearing(0.1, ms(100));
        tracker.update_bearing(0.2, ms(200));
        tracker.update_bearing(0.3, ms(300));
        assert_eq!(tracker.samples().len(), 2);

        // one slow sample after a long pause never drops below the floor
        tracker.update_bearing(0.4, ms(5_000));
        let kept: Vec<_> = tracker.samples().map(|s| s.at).collect();
        assert_eq!(kept, vec![ms(300), ms(5_000)]);
    }

    #[test]
    fn recent_samples_inside_window_are_kept() {
        let mut tracker = DragTracker::default();
        tracker.begin_bearing(0.0, ms(1_000));
        for k in 1..=5 {
            tracker.update_bearing(0.05 * k as f64, ms(1_000 + 20 * k));
        }
        assert_eq!(tracker.samples().len(), 6);
    }

    #[test]
    fn release_velocity_spans_window() {
        let mut tracker = DragTracker::default();
        tracker.begin_bearing(0.0, ms(0));
        tracker.update_bearing(0.5, ms(50));
        tracker.update_bearing(1.0, ms(100));
        let v = tracker.release_velocity().unwrap();
        assert!((v - 10.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_releases() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.release_velocity(), None);

        tracker.begin_bearing(0.0, ms(10));
        assert_eq!(tracker.release_velocity(), None);

        tracker.update_bearing(1.0, ms(10));
        assert_eq!(tracker.release_velocity(), Some(0.0));
    }

    #[test]
    fn begin_resets_previous_drag() {
        let mut tracker = DragTracker::default();
        tracker.begin_bearing(0.0, ms(0));
        tracker.update_bearing(2.0, ms(16));
        tracker.begin_bearing(-1.0, ms(500));
        assert_eq!(tracker.unwrapped_total(), 0.0);
        assert_eq!(tracker.samples().len(), 1);
        assert_eq!(tracker.update_bearing(-0.5, ms(516)), 0.5);
    }
}
