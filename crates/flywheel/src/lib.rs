//! Spin physics and angle tracking for a wheel-of-names picker.
//!
//! The [`Wheel`] controller owns all state; everything else is a leaf it
//! composes: [`angle`] for the shared wedge convention, [`drag`] for turning
//! pointer motion into an unwrapped rotation, [`sim`] for the spin state
//! machine and [`wedges`] for the labels and the result.

pub mod angle;
pub mod control;
pub mod drag;
pub mod geometry;
mod macros;
pub mod sim;
pub mod tuning;
pub mod wedges;
pub mod wheel;

pub use angle::Direction;
pub use geometry::Point;
pub use sim::{Phase, Release, SpinSimulation, Step};
pub use tuning::{SpinParameters, Tuning, TuningError};
pub use wedges::{Label, WedgeError, WedgeList};
pub use wheel::{Wheel, WheelAction, WheelEvent};
