use crate::angle;
use crate::drag::DragTracker;
use crate::tuning::{SpinParameters, Tuning};
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Spinning,
    Settled,
}

impl Phase {
    /// True while the wheel is being touched or is still moving.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Dragging | Self::Spinning)
    }
}

/// What a pointer release (or a programmatic fling) turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Nothing was being dragged.
    Ignored,
    /// Too slow to throw; the wheel stays where it was let go.
    Settled,
    Spinning(SpinParameters),
}

/// Result of advancing a spin by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The spin came to rest during this frame.
    Settled,
    /// Nothing to do; the wheel was not spinning when woken.
    Stop,
}

/// The wheel's rotation state machine.
#[derive(Debug, Clone)]
pub struct SpinSimulation {
    phase: Phase,
    angle: f64,
    velocity: f64,
    deceleration: f64,
    drag_start_angle: f64,
    params: Option<SpinParameters>,
    tracker: DragTracker,
    tuning: Tuning,
}

impl Default for SpinSimulation {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl SpinSimulation {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: Phase::Idle,
            angle: 0.0,
            velocity: 0.0,
            deceleration: 0.0,
            drag_start_angle: 0.0,
            params: None,
            tracker: DragTracker::from_tuning(&tuning),
            tuning,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn deceleration(&self) -> f64 {
        self.deceleration
    }

    /// Parameters of the current or most recent throw.
    pub fn params(&self) -> Option<&SpinParameters> {
        self.params.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Spinning
    }

    /// New tuning applies from the next drag or throw on.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        if !self.phase.is_busy() {
            self.tracker = DragTracker::from_tuning(&tuning);
        }
        self.tuning = tuning;
    }

    /// Grabs the wheel. Returns true when this interrupted a spin.
    pub fn pointer_down(&mut self, bearing: f64, now: Duration) -> bool {
        let interrupted = self.is_spinning();
        if self.phase != Phase::Dragging {
            self.tracker = DragTracker::from_tuning(&self.tuning);
        }

        self.phase = Phase::Dragging;
        self.velocity = 0.0;
        self.deceleration = 0.0;
        self.params = None;
        self.drag_start_angle = self.angle;
        self.tracker.begin_bearing(bearing, now);

        log::debug!("Drag started at angle {:.3}", self.angle);
        interrupted
    }

    /// Follows the pointer while dragging; returns the new angle.
    pub fn pointer_move(&mut self, bearing: f64, now: Duration) -> Option<f64> {
        if self.phase != Phase::Dragging {
            return None;
        }
        let total = self.tracker.update_bearing(bearing, now);
        self.angle = self.drag_start_angle + total;
        Some(self.angle)
    }

    /// Lets go of the wheel. Cancellation goes through here too, so a drag
    /// never outlives its pointer.
    pub fn pointer_up(&mut self) -> Release {
        if self.phase != Phase::Dragging {
            return Release::Ignored;
        }
        match self.tracker.release_velocity() {
            Some(velocity) => self.launch(velocity),
            None => {
                self.settle();
                Release::Settled
            }
        }
    }

    /// Throws the wheel at `velocity` without a drag. Ignored mid-drag.
    pub fn fling(&mut self, velocity: f64) -> Release {
        if self.phase == Phase::Dragging {
            return Release::Ignored;
        }
        self.launch(velocity)
    }

    fn launch(&mut self, velocity: f64) -> Release {
        let Some(params) = SpinParameters::from_release(velocity, &self.tuning) else {
            log::debug!("Release at {velocity:.3} rad/s is below the throw threshold");
            self.settle();
            return Release::Settled;
        };

        self.phase = Phase::Spinning;
        self.velocity = params.initial_velocity;
        self.deceleration = params.deceleration;
        self.params = Some(params);
        Release::Spinning(params)
    }

    /// Advances a spin by `dt` of wall-clock time.
    pub fn tick(&mut self, dt: Duration) -> Step {
        if !self.is_spinning() {
            return Step::Stop;
        }

        let direction = angle::sign(self.velocity);
        if direction == 0.0 {
            self.settle();
            return Step::Settled;
        }

        let dt = dt.as_secs_f64();
        self.velocity -= direction * self.deceleration * dt;
        // crossing (or touching) zero ends the spin; it never reverses
        if angle::sign(self.velocity) != direction {
            self.settle();
            return Step::Settled;
        }

        self.angle += self.velocity * dt;
        Step::Continue
    }

    fn settle(&mut self) {
        self.phase = Phase::Settled;
        self.velocity = 0.0;
        self.deceleration = 0.0;
        log::debug!("Settled at angle {:.3}", self.angle);
    }
}
