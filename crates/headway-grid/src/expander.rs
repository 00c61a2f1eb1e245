use headway_core::traits::{Expander, WeightedEdge};

use crate::{OccupancyGrid, TransitionValidator, Waypoint};

/// Position offsets tried along each axis, in enumeration order.
const AXIS_OFFSETS: [i32; 3] = [0, 1, -1];

/// Upper bound on the successors of a single waypoint: 3 × 3 position offsets × 4 headings.
pub const MAX_CANDIDATES: usize = AXIS_OFFSETS.len() * AXIS_OFFSETS.len() * 4;

/// Generates the waypoints reachable in one legal step.
///
/// Every combination of a `{0, 1, -1}` offset on each axis and a `0..4` quarter-turn rotation is
/// tried, and a candidate is kept when the validator accepts both the waypoint itself and the
/// transition to it. The work per expansion is therefore fixed regardless of grid size.
pub struct OrientedExpander<'a, V> {
    grid: &'a OccupancyGrid,
    validator: &'a V,
}

impl<'a, V: TransitionValidator> OrientedExpander<'a, V> {
    pub fn new(grid: &'a OccupancyGrid, validator: &'a V) -> Self {
        OrientedExpander { grid, validator }
    }

    pub fn grid(&self) -> &'a OccupancyGrid {
        self.grid
    }

    fn for_each_neighbour(&self, current: Waypoint, mut f: impl FnMut(Waypoint)) {
        for i in AXIS_OFFSETS {
            for j in AXIS_OFFSETS {
                for k in 0..4 {
                    let candidate = Waypoint::new(
                        current.x + i,
                        current.y + j,
                        current.orientation.rotated(k),
                    );
                    if self.validator.is_valid_waypoint(candidate, self.grid)
                        && self.validator.is_valid_transition(current, candidate)
                    {
                        f(candidate);
                    }
                }
            }
        }
    }
}

impl<'a, V: TransitionValidator> Expander<Waypoint> for OrientedExpander<'a, V> {
    type Edge = WeightedEdge<Waypoint>;

    fn expand(&mut self, current: Waypoint, edges: &mut Vec<WeightedEdge<Waypoint>>) {
        let validator = self.validator;
        self.for_each_neighbour(current, |successor| {
            edges.push(WeightedEdge {
                successor,
                cost: validator.step_cost(current, successor),
            })
        });
    }
}

/// Lists the waypoints reachable from `current` in one legal step, in enumeration order.
pub fn valid_neighbours(
    current: Waypoint,
    grid: &OccupancyGrid,
    validator: &impl TransitionValidator,
) -> Vec<Waypoint> {
    let mut neighbours = Vec::with_capacity(MAX_CANDIDATES);
    OrientedExpander::new(grid, validator).for_each_neighbour(current, |w| neighbours.push(w));
    neighbours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MovementModel, Orientation::*, Step};

    struct AcceptAll;

    impl TransitionValidator for AcceptAll {
        fn is_valid_waypoint(&self, _: Waypoint, _: &OccupancyGrid) -> bool {
            true
        }

        fn is_valid_transition(&self, _: Waypoint, _: Waypoint) -> bool {
            true
        }
    }

    #[test]
    fn enumerates_thirty_six_candidates() {
        let grid = OccupancyGrid::new(1, 1);
        let all = valid_neighbours(Waypoint::new(0, 0, North), &grid, &AcceptAll);
        assert_eq!(all.len(), MAX_CANDIDATES);
        assert_eq!(all.len(), 36);
        // the degenerate candidate comes first; it is up to the validator to reject it
        assert_eq!(all[0], Waypoint::new(0, 0, North));
        assert_eq!(all[1], Waypoint::new(0, 0, West));
        assert_eq!(all[4], Waypoint::new(0, 1, North));
    }

    #[test]
    fn differential_drive_in_open_space() {
        let grid = OccupancyGrid::new(3, 3);
        let here = Waypoint::new(1, 1, East);
        let neighbours = valid_neighbours(here, &grid, &MovementModel::default());
        assert_eq!(
            neighbours,
            vec![
                Waypoint::new(1, 1, North),
                Waypoint::new(1, 1, South),
                Waypoint::new(2, 1, East),
                Waypoint::new(0, 1, East),
            ]
        );
    }

    #[test]
    fn obstacles_and_edges_prune_candidates() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set_blocked(1, 1, true);
        let model = MovementModel::all();
        let here = Waypoint::new(0, 1, East);
        let neighbours = valid_neighbours(here, &grid, &model);
        assert!(!neighbours.contains(&here));
        assert!(neighbours.iter().all(|w| grid.is_free(w.x, w.y)));
        // forward is blocked, the right arc lands on (1, 0)
        assert!(!neighbours.contains(&Waypoint::new(1, 1, East)));
        assert!(neighbours.contains(&Waypoint::new(1, 0, South)));
        for w in &neighbours {
            assert!(Step::classify(here, *w).is_some());
        }
    }

    #[test]
    fn arcs_cut_corners_past_obstacles() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set_blocked(1, 0, true);
        grid.set_blocked(0, 1, true);
        let here = Waypoint::new(0, 0, East);
        let neighbours = valid_neighbours(here, &grid, &MovementModel::all());
        // both cells the arc sweeps are blocked; only the landing cell counts
        assert!(neighbours.contains(&Waypoint::new(1, 1, North)));
        let turning = valid_neighbours(here, &grid, &MovementModel::default());
        assert!(turning.iter().all(|w| w.position() == (0, 0)));
    }

    #[test]
    fn expander_reports_step_costs() {
        let grid = OccupancyGrid::new(3, 3);
        let model = MovementModel::default().with_turn_cost(2);
        let mut expander = OrientedExpander::new(&grid, &model);
        let mut edges = vec![];
        expander.expand(Waypoint::new(0, 0, North), &mut edges);
        let costs: Vec<_> = edges.iter().map(|e| (e.successor, e.cost)).collect();
        assert_eq!(
            costs,
            vec![
                (Waypoint::new(0, 0, West), 2),
                (Waypoint::new(0, 0, East), 2),
                (Waypoint::new(0, 1, North), 1),
            ]
        );
    }
}
