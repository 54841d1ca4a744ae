use crate::angle::Direction;
use crate::geometry::Point;
use crate::sim::{Phase, Release, SpinSimulation, Step};
use crate::tuning::{SpinParameters, Tuning};
use crate::wedges::{Label, WedgeError, WedgeList};
use std::time::Duration;

/// Things the outside world (sound, result display) reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    SpinStarted(SpinParameters),
    /// A drag grabbed the wheel while it was still spinning.
    SpinCancelled,
    /// Emitted exactly once each time the wheel comes to rest.
    Settled {
        index: Option<usize>,
        label: Option<Label>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WheelAction {
    pub should_redraw: bool,
    /// Keep the frame loop running.
    pub should_tick: bool,
    pub event: Option<WheelEvent>,
}

impl WheelAction {
    pub fn new(should_redraw: bool, should_tick: bool, event: Option<WheelEvent>) -> Self {
        Self {
            should_redraw,
            should_tick,
            event,
        }
    }

    fn none() -> Self {
        Self::default()
    }
}

/// Owns the whole wheel: labels, rotation and the current drag.
///
/// Every input is a single call that runs to completion and reports what
/// changed, so the host can drive it from any event loop.
#[derive(Debug, Clone)]
pub struct Wheel {
    wedges: WedgeList,
    sim: SpinSimulation,
    center: Point,
    pointer: Direction,
    last_frame: Option<Duration>,
}

impl Wheel {
    pub fn new(wedges: WedgeList, tuning: Tuning, pointer: Direction) -> Self {
        Self {
            wedges,
            sim: SpinSimulation::new(tuning),
            center: Point::default(),
            pointer,
            last_frame: None,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.sim = self.sim.with_angle(angle);
        self
    }

    pub fn wedges(&self) -> &WedgeList {
        &self.wedges
    }

    pub fn angle(&self) -> f64 {
        self.sim.angle()
    }

    pub fn velocity(&self) -> f64 {
        self.sim.velocity()
    }

    pub fn phase(&self) -> Phase {
        self.sim.phase()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn pointer(&self) -> Direction {
        self.pointer
    }

    pub fn tuning(&self) -> &Tuning {
        self.sim.tuning()
    }

    pub fn is_spinning(&self) -> bool {
        self.sim.is_spinning()
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn set_pointer(&mut self, pointer: Direction) {
        self.pointer = pointer;
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.sim.set_tuning(tuning);
    }

    /// Swaps in a new set of labels; only while the wheel is at rest.
    pub fn replace_wedges(&mut self, wedges: WedgeList) -> Result<(), WedgeError> {
        let phase = self.phase();
        if phase.is_busy() {
            return Err(WedgeError::Busy(phase));
        }
        self.wedges = wedges;
        Ok(())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.wedges.current_index(self.angle(), self.pointer)
    }

    pub fn current(&self) -> Option<&Label> {
        self.wedges.current(self.angle(), self.pointer)
    }

    pub fn can_remove_current(&self) -> bool {
        self.wedges.can_remove(self.phase())
    }

    pub fn remove_current(&mut self) -> Result<Label, WedgeError> {
        let removed = self
            .wedges
            .remove_current(self.sim.phase(), self.sim.angle(), self.pointer)?;
        log::info!("Removed wedge '{}'", removed);
        Ok(removed)
    }

    pub fn remove(&mut self, index: usize) -> Result<Label, WedgeError> {
        let removed = self.wedges.remove_at(self.sim.phase(), index)?;
        log::info!("Removed wedge '{}'", removed);
        Ok(removed)
    }

    pub fn add(&mut self, raw: &str) -> Result<Label, WedgeError> {
        let label = self.wedges.add(raw)?;
        log::info!("Added wedge '{}'", label);
        Ok(label)
    }

    pub fn pointer_down(&mut self, pos: Point, now: Duration) -> WheelAction {
        let interrupted = self.sim.pointer_down(pos.bearing_from(self.center), now);
        self.last_frame = None;
        let event = interrupted.then_some(WheelEvent::SpinCancelled);
        WheelAction::new(interrupted, false, event)
    }

    pub fn pointer_move(&mut self, pos: Point, now: Duration) -> WheelAction {
        match self.sim.pointer_move(pos.bearing_from(self.center), now) {
            Some(_) => WheelAction::new(true, false, None),
            None => WheelAction::none(),
        }
    }

    pub fn pointer_up(&mut self) -> WheelAction {
        let release = self.sim.pointer_up();
        self.apply_release(release)
    }

    /// A cancelled pointer is a release; the drag must not linger.
    pub fn pointer_cancel(&mut self) -> WheelAction {
        self.pointer_up()
    }

    /// Throws the wheel as if released at `velocity` rad/s.
    pub fn fling(&mut self, velocity: f64) -> WheelAction {
        let release = self.sim.fling(velocity);
        self.apply_release(release)
    }

    fn apply_release(&mut self, release: Release) -> WheelAction {
        match release {
            Release::Ignored => WheelAction::none(),
            Release::Settled => WheelAction::new(true, false, Some(self.settled_event())),
            Release::Spinning(params) => {
                self.last_frame = None;
                log::info!(
                    "Spin started at {:.2} rad/s, settling in {:.2}s",
                    params.initial_velocity,
                    params.duration
                );
                WheelAction::new(true, true, Some(WheelEvent::SpinStarted(params)))
            }
        }
    }

    /// One frame of the spin loop. `now` is a monotonic timestamp; the first
    /// frame after a throw only records it.
    pub fn tick(&mut self, now: Duration) -> WheelAction {
        if !self.sim.is_spinning() {
            self.last_frame = None;
            return WheelAction::none();
        }

        let dt = self
            .last_frame
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last_frame = Some(now);

        match self.sim.tick(dt) {
            Step::Continue => WheelAction::new(true, true, None),
            Step::Settled => {
                self.last_frame = None;
                WheelAction::new(true, false, Some(self.settled_event()))
            }
            Step::Stop => WheelAction::none(),
        }
    }

    fn settled_event(&self) -> WheelEvent {
        let index = self.current_index();
        let label = self.current().cloned();
        match &label {
            Some(l) => log::info!("Wheel settled on '{}'", l),
            None => log::info!("Wheel settled with no wedges"),
        }
        WheelEvent::Settled { index, label }
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(WedgeList::defaults(), Tuning::default(), Direction::default())
    }
}
