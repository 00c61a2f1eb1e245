//! Oriented grid state space: occupancy maps, waypoints, movement models and the expander that
//! ties them together for search.

mod expander;
mod grid;
mod movement;
mod occupancy;
mod waypoint;

use headway_core::traits::Heuristic;

pub use self::expander::*;
pub use self::grid::*;
pub use self::movement::*;
pub use self::occupancy::*;
pub use self::waypoint::*;

pub fn manhattan_distance(from: (i32, i32), to: (i32, i32)) -> u32 {
    from.0.abs_diff(to.0) + from.1.abs_diff(to.1)
}

/// Manhattan distance between waypoint positions. Headings are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanDistance;

impl Heuristic<Waypoint> for ManhattanDistance {
    fn estimate(&self, state: &Waypoint, goal: &Waypoint) -> u32 {
        manhattan_distance(state.position(), goal.position())
    }
}

#[test]
fn manhattan_ignores_heading() {
    let a = Waypoint::new(0, 0, Orientation::East);
    let b = Waypoint::new(-2, 3, Orientation::South);
    assert_eq!(ManhattanDistance.estimate(&a, &b), 5);
    assert_eq!(ManhattanDistance.estimate(&b, &a), 5);
    assert_eq!(ManhattanDistance.estimate(&a, &a), 0);
}
