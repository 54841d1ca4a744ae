pub mod view;

pub use view::draw;

pub const WHEEL_SIZE: i32 = 480;
pub const RIM_MARGIN: f64 = 6.0; // gap between wheel edge and drawing area
pub const HUB_RADIUS: f64 = 36.0;
pub const LABEL_RADIUS_FACTOR: f64 = 0.65; // label distance from center, relative to wheel radius
pub const LABEL_FONT_SIZE: f64 = 20.0;
pub const REFERENCE_RADIUS: f64 = 234.0; // radius the font size above is tuned for
pub const POINTER_LENGTH: f64 = 28.0;
pub const POINTER_HALF_WIDTH: f64 = 14.0;
pub const PLACEHOLDER: &str = "—";
