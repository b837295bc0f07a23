//! Defensive Formation Tables
//!
//! Pure lookup from (active defender count, raider lane) to a defensive
//! shape. Coordinates are authored for the left half of the 0-100 board;
//! the caller mirrors x -> 100 - x for the right-hand side. One coordinate
//! per active defender, arcs for the neutral lane and skewed "cover" shapes
//! when the raider commits high or low.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::FieldPos;

/// Vertical band a raider commits to. Band edges on the y axis: top is
/// anything above 40, bottom anything below 60, center the strip between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Top,
    Center,
    Bottom,
}

/// One-step lane change requested by a feint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeintDirection {
    Up,
    Down,
}

impl Lane {
    /// Move one lane in the given direction, clamped at the edges.
    pub fn shift(self, direction: FeintDirection) -> Lane {
        match (self, direction) {
            (Lane::Bottom, FeintDirection::Up) => Lane::Center,
            (Lane::Center, FeintDirection::Up) => Lane::Top,
            (Lane::Top, FeintDirection::Up) => Lane::Top,
            (Lane::Top, FeintDirection::Down) => Lane::Center,
            (Lane::Center, FeintDirection::Down) => Lane::Bottom,
            (Lane::Bottom, FeintDirection::Down) => Lane::Bottom,
        }
    }

    /// Does a y coordinate fall inside this lane's band?
    pub fn contains_y(self, y: f32) -> bool {
        match self {
            Lane::Top => y < 40.0,
            Lane::Center => (40.0..=60.0).contains(&y),
            Lane::Bottom => y > 60.0,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lane::Top => "top",
            Lane::Center => "center",
            Lane::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

const fn pos(x: f32, y: f32) -> FieldPos {
    FieldPos { x, y }
}

// 7 defenders
const CENTER_7: [FieldPos; 7] = [
    pos(40.0, 12.5),
    pos(35.0, 25.0),
    pos(32.0, 37.5),
    pos(30.0, 50.0),
    pos(32.0, 62.5),
    pos(35.0, 75.0),
    pos(40.0, 87.5),
];
const TOP_COVER_7: [FieldPos; 7] = [
    pos(30.0, 12.5),
    pos(32.0, 25.0),
    pos(40.0, 40.5),
    pos(50.0, 49.0),
    pos(45.0, 62.5),
    pos(48.0, 75.0),
    pos(60.0, 82.5),
];
const BOTTOM_COVER_7: [FieldPos; 7] = [
    pos(60.0, 18.5),
    pos(48.0, 25.0),
    pos(45.0, 37.5),
    pos(50.0, 51.0),
    pos(40.0, 59.5),
    pos(32.0, 75.0),
    pos(30.0, 87.5),
];

// 6 defenders
const CENTER_6: [FieldPos; 6] = [
    pos(40.0, 14.3),
    pos(35.0, 28.6),
    pos(30.0, 42.9),
    pos(30.0, 57.1),
    pos(35.0, 71.4),
    pos(40.0, 85.7),
];
const TOP_COVER_6: [FieldPos; 6] = [
    pos(30.0, 14.3),
    pos(32.0, 27.6),
    pos(35.0, 40.9),
    pos(48.0, 51.1),
    pos(50.0, 67.4),
    pos(60.0, 67.7),
];
const BOTTOM_COVER_6: [FieldPos; 6] = [
    pos(60.0, 32.3),
    pos(50.0, 32.6),
    pos(48.0, 48.9),
    pos(35.0, 59.1),
    pos(32.0, 72.4),
    pos(30.0, 85.7),
];

// 5 defenders
const CENTER_5: [FieldPos; 5] = [
    pos(40.0, 16.7),
    pos(35.0, 33.3),
    pos(30.0, 50.0),
    pos(35.0, 66.7),
    pos(40.0, 83.3),
];
const TOP_COVER_5: [FieldPos; 5] = [
    pos(20.0, 16.7),
    pos(25.0, 33.3),
    pos(45.0, 50.0),
    pos(48.0, 66.7),
    pos(60.0, 68.3),
];
const BOTTOM_COVER_5: [FieldPos; 5] = [
    pos(60.0, 31.7),
    pos(48.0, 33.3),
    pos(45.0, 50.0),
    pos(25.0, 66.7),
    pos(20.0, 83.3),
];

// 4 defenders
const CENTER_4: [FieldPos; 4] = [
    pos(40.0, 20.0),
    pos(35.0, 40.0),
    pos(35.0, 60.0),
    pos(40.0, 80.0),
];
const TOP_COVER_4: [FieldPos; 4] = [
    pos(25.0, 20.0),
    pos(30.0, 40.0),
    pos(48.0, 50.0),
    pos(58.0, 52.0),
];
const BOTTOM_COVER_4: [FieldPos; 4] = [
    pos(58.0, 48.0),
    pos(48.0, 50.0),
    pos(30.0, 60.0),
    pos(25.0, 80.0),
];

// 3 defenders
const CENTER_3: [FieldPos; 3] = [pos(40.0, 25.0), pos(35.0, 50.0), pos(40.0, 75.0)];
const TOP_COVER_3: [FieldPos; 3] = [pos(30.0, 21.0), pos(48.0, 48.0), pos(60.0, 48.0)];
const BOTTOM_COVER_3: [FieldPos; 3] = [pos(60.0, 52.0), pos(48.0, 52.0), pos(30.0, 79.0)];

// 2 defenders
const CENTER_2: [FieldPos; 2] = [pos(40.0, 25.0), pos(40.0, 75.0)];
const TOP_COVER_2: [FieldPos; 2] = [pos(30.0, 20.0), pos(55.0, 50.0)];
const BOTTOM_COVER_2: [FieldPos; 2] = [pos(55.0, 50.0), pos(30.0, 80.0)];

// 1 defender
const CENTER_1: [FieldPos; 1] = [pos(30.0, 50.0)];
const TOP_COVER_1: [FieldPos; 1] = [pos(30.0, 40.0)];
const BOTTOM_COVER_1: [FieldPos; 1] = [pos(30.0, 60.0)];

/// Defensive shape for `active_defenders` players against a raider in
/// `lane`. Left-half coordinates; empty for zero (or out-of-table)
/// defender counts.
pub fn formation_positions(active_defenders: usize, lane: Lane) -> &'static [FieldPos] {
    match (active_defenders, lane) {
        (7, Lane::Center) => &CENTER_7,
        (7, Lane::Top) => &TOP_COVER_7,
        (7, Lane::Bottom) => &BOTTOM_COVER_7,
        (6, Lane::Center) => &CENTER_6,
        (6, Lane::Top) => &TOP_COVER_6,
        (6, Lane::Bottom) => &BOTTOM_COVER_6,
        (5, Lane::Center) => &CENTER_5,
        (5, Lane::Top) => &TOP_COVER_5,
        (5, Lane::Bottom) => &BOTTOM_COVER_5,
        (4, Lane::Center) => &CENTER_4,
        (4, Lane::Top) => &TOP_COVER_4,
        (4, Lane::Bottom) => &BOTTOM_COVER_4,
        (3, Lane::Center) => &CENTER_3,
        (3, Lane::Top) => &TOP_COVER_3,
        (3, Lane::Bottom) => &BOTTOM_COVER_3,
        (2, Lane::Center) => &CENTER_2,
        (2, Lane::Top) => &TOP_COVER_2,
        (2, Lane::Bottom) => &BOTTOM_COVER_2,
        (1, Lane::Center) => &CENTER_1,
        (1, Lane::Top) => &TOP_COVER_1,
        (1, Lane::Bottom) => &BOTTOM_COVER_1,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_position_per_defender() {
        for count in 0..=7usize {
            for lane in [Lane::Top, Lane::Center, Lane::Bottom] {
                assert_eq!(
                    formation_positions(count, lane).len(),
                    count,
                    "count {} lane {}",
                    count,
                    lane
                );
            }
        }
    }

    #[test]
    fn test_out_of_table_counts_are_empty() {
        assert!(formation_positions(8, Lane::Center).is_empty());
        assert!(formation_positions(42, Lane::Top).is_empty());
    }

    #[test]
    fn test_lane_shift_clamps_at_edges() {
        assert_eq!(Lane::Top.shift(FeintDirection::Up), Lane::Top);
        assert_eq!(Lane::Bottom.shift(FeintDirection::Down), Lane::Bottom);
        assert_eq!(Lane::Center.shift(FeintDirection::Up), Lane::Top);
        assert_eq!(Lane::Top.shift(FeintDirection::Down), Lane::Center);
    }

    #[test]
    fn test_lane_bands() {
        assert!(Lane::Top.contains_y(12.5));
        assert!(!Lane::Top.contains_y(40.0));
        assert!(Lane::Center.contains_y(40.0));
        assert!(Lane::Center.contains_y(60.0));
        assert!(Lane::Bottom.contains_y(60.1));
        assert!(!Lane::Bottom.contains_y(60.0));
    }

    #[test]
    fn test_positions_stay_on_left_half_arcs() {
        // Neutral arcs never cross midfield; cover shapes may push past it.
        for count in 1..=7usize {
            for p in formation_positions(count, Lane::Center) {
                assert!(p.x <= 50.0, "center arc leaked past midfield: {:?}", p);
                assert!((0.0..=100.0).contains(&p.y));
            }
        }
    }
}
