//! Angle helpers shared by the simulation and the renderer.
//!
//! All angles are radians in screen space: zero points right and positive
//! rotation turns clockwise because y grows downward. Wedge `i` of `n` spans
//! `[i * slice, (i + 1) * slice)` in the wheel's own, unrotated frame.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Where the fixed pointer sits around the wheel.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[strum(serialize = "North", serialize = "n", serialize = "0")]
    North,
    #[strum(serialize = "NorthEast", serialize = "ne", serialize = "1")]
    NorthEast,
    #[strum(serialize = "East", serialize = "e", serialize = "2")]
    East,
    #[strum(serialize = "SouthEast", serialize = "se", serialize = "3")]
    SouthEast,
    #[strum(serialize = "South", serialize = "s", serialize = "4")]
    South,
    #[strum(serialize = "SouthWest", serialize = "sw", serialize = "5")]
    SouthWest,
    #[strum(serialize = "West", serialize = "w", serialize = "6")]
    West,
    #[strum(serialize = "NorthWest", serialize = "nw", serialize = "7")]
    NorthWest,
}

impl Direction {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx % 8)
    }

    /// Screen-space angle of this direction. North is straight up, `-PI / 2`.
    pub fn radians(&self) -> f64 {
        -FRAC_PI_2 + self.as_index() as f64 * FRAC_PI_4
    }
}

/// Reduces `angle` into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // tiny negative inputs round up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

/// Signed shortest rotation taking `from` to `to`, in `(-π, π]`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    PI - (PI - (to - from)).rem_euclid(TAU)
}

/// Like `f64::signum`, but zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn slice(count: usize) -> f64 {
    TAU / count as f64
}

/// Start and end angle of wedge `index` in the unrotated wheel frame.
pub fn wedge_span(index: usize, count: usize) -> (f64, f64) {
    let step = slice(count);
    (index as f64 * step, (index + 1) as f64 * step)
}

/// Index of the wedge under a pointer at the top of the wheel.
pub fn wedge_index(angle: f64, count: usize) -> Option<usize> {
    wedge_index_at(angle, count, Direction::North)
}

/// Index of the wedge under `pointer` once the wheel is rotated by `angle`.
///
/// Returns `None` for a wheel without wedges.
pub fn wedge_index_at(angle: f64, count: usize, pointer: Direction) -> Option<usize> {
    if count == 0 {
        return None;
    }
    // pointer direction expressed in the wheel's own frame
    let local = normalize(pointer.radians() - angle);
    let index = (local / slice(count)).floor() as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent_and_in_range() {
        let inputs = [
            0.0,
            -0.0,
            1.0,
            -1.0,
            TAU,
            -TAU,
            PI,
            -PI,
            3.0 * TAU + 0.25,
            -7.5 * TAU,
            -1e-17,
            1e9,
            -1e9,
        ];
        for x in inputs {
            let n = normalize(x);
            assert!((0.0..TAU).contains(&n), "normalize({x}) = {n}");
            assert_eq!(normalize(n), n);
        }
    }

    #[test]
    fn shortest_delta_stays_within_half_turn() {
        assert!((shortest_delta(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-12);
        assert!((shortest_delta(-3.0, 3.0) + (TAU - 6.0)).abs() < 1e-12);
        assert!((shortest_delta(0.1, 0.3) - 0.2).abs() < 1e-12);
        assert_eq!(shortest_delta(0.0, PI), PI);
        assert_eq!(shortest_delta(PI, 0.0), PI);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-2.5), -1.0);
    }

    #[test]
    fn pointer_at_top_selects_last_quarter_at_rest() {
        assert_eq!(wedge_index(0.0, 4), Some(3));
    }

    #[test]
    fn rotating_clockwise_walks_wedges_backwards() {
        let quarter = FRAC_PI_2;
        assert_eq!(wedge_index(quarter * 0.5, 4), Some(2));
        assert_eq!(wedge_index(quarter * 1.5, 4), Some(1));
        assert_eq!(wedge_index(quarter * 2.5, 4), Some(0));
        assert_eq!(wedge_index(-quarter * 0.5, 4), Some(3));
        assert_eq!(wedge_index(TAU * 5.0 + quarter * 1.5, 4), Some(1));
    }

    #[test]
    fn empty_wheel_has_no_wedge() {
        assert_eq!(wedge_index(1.0, 0), None);
    }

    #[test]
    fn east_pointer_reads_first_wedge_at_rest() {
        assert_eq!(wedge_index_at(0.0, 4, Direction::East), Some(0));
        assert_eq!(wedge_index_at(0.0, 4, Direction::South), Some(1));
    }

    #[test]
    fn every_wedge_owns_one_contiguous_range() {
        const STEPS: usize = 7200;
        for n in [1usize, 2, 11, 12] {
            let seq: Vec<usize> = (0..STEPS)
                .map(|k| wedge_index(k as f64 * TAU / STEPS as f64, n).unwrap())
                .collect();

            let mut runs: Vec<usize> = Vec::new();
            for idx in seq {
                if runs.last() != Some(&idx) {
                    runs.push(idx);
                }
            }
            // the sweep is circular, so the last run may continue the first
            if runs.len() > 1 && runs.first() == runs.last() {
                runs.pop();
            }

            let mut seen = runs.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(runs.len(), n, "n = {n}: {runs:?}");
            assert_eq!(seen, (0..n).collect::<Vec<_>>(), "n = {n}");
        }
    }

    #[test]
    fn renderer_span_contains_selected_wedge() {
        for n in [3usize, 7, 12] {
            for k in 0..50 {
                let angle = k as f64 * 0.37 - 4.0;
                let idx = wedge_index(angle, n).unwrap();
                let (start, end) = wedge_span(idx, n);
                let local = normalize(Direction::North.radians() - angle);
                assert!(start <= local + 1e-12 && local < end + 1e-12);
            }
        }
    }

    #[test]
    fn test_direction_deserialization() {
        let cases = vec![
            ("\"north\"", Direction::North),
            ("\"N\"", Direction::North),
            ("\"0\"", Direction::North),
            ("\"east\"", Direction::East),
            ("\"sw\"", Direction::SouthWest),
            ("\"NorthWest\"", Direction::NorthWest),
        ];

        for (json, expected) in cases {
            let deserialized: Direction = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn direction_radians_follow_compass() {
        assert_eq!(Direction::North.radians(), -FRAC_PI_2);
        assert_eq!(Direction::East.radians(), 0.0);
        assert!((Direction::South.radians() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(Direction::from_index(10), Some(Direction::East));
    }
}
