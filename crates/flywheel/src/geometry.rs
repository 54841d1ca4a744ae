#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Raw `atan2` reading of this point as seen from `center`, in `(-π, π]`.
    pub fn bearing_from(&self, center: Point) -> f64 {
        let (dx, dy) = (self.x - center.x, self.y - center.y);
        dy.atan2(dx)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx.hypot(dy)
    }

    /// Point at `radius` from `self` in direction `angle`.
    pub fn offset(&self, angle: f64, radius: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn bearing_uses_screen_axes() {
        let c = Point::new(100.0, 100.0);
        assert_eq!(Point::new(150.0, 100.0).bearing_from(c), 0.0);
        assert_eq!(Point::new(100.0, 150.0).bearing_from(c), FRAC_PI_2);
        assert_eq!(Point::new(100.0, 50.0).bearing_from(c), -FRAC_PI_2);
        assert_eq!(Point::new(50.0, 100.0).bearing_from(c), PI);
    }

    #[test]
    fn offset_round_trips_distance() {
        let c = Point::new(10.0, -4.0);
        let p = c.offset(1.2, 30.0);
        assert!((p.distance_to(c) - 30.0).abs() < 1e-9);
        assert!((p.bearing_from(c) - 1.2).abs() < 1e-12);
    }
}
