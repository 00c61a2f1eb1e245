use enumset::{EnumSet, EnumSetType};

use crate::{OccupancyGrid, Waypoint};

/// Decides which waypoints an agent may occupy and which single steps it may take.
pub trait TransitionValidator {
    /// Whether `waypoint` lies on the grid, on a free cell.
    fn is_valid_waypoint(&self, waypoint: Waypoint, grid: &OccupancyGrid) -> bool {
        grid.is_free(waypoint.x, waypoint.y)
    }

    /// Whether going from `current` to `candidate` is one legal step.
    fn is_valid_transition(&self, current: Waypoint, candidate: Waypoint) -> bool;

    /// Cost of a step already known to be legal.
    fn step_cost(&self, _current: Waypoint, _candidate: Waypoint) -> u32 {
        1
    }
}

impl<V: TransitionValidator + ?Sized> TransitionValidator for &V {
    fn is_valid_waypoint(&self, waypoint: Waypoint, grid: &OccupancyGrid) -> bool {
        (**self).is_valid_waypoint(waypoint, grid)
    }

    fn is_valid_transition(&self, current: Waypoint, candidate: Waypoint) -> bool {
        (**self).is_valid_transition(current, candidate)
    }

    fn step_cost(&self, current: Waypoint, candidate: Waypoint) -> u32 {
        (**self).step_cost(current, candidate)
    }
}

/// The kinds of single step an agent can take.
#[derive(EnumSetType, Debug, Hash)]
pub enum Step {
    /// One cell along the heading.
    Forward,
    /// One cell against the heading.
    Reverse,
    /// Quarter turn counter-clockwise in place.
    TurnLeft,
    /// Quarter turn clockwise in place.
    TurnRight,
    /// Half turn in place.
    TurnAround,
    /// Quarter-circle forward and to the left, ending one cell ahead and one cell left, facing
    /// left. The cells it passes over are not checked.
    ArcLeft,
    /// Quarter-circle forward and to the right. The cells it passes over are not checked.
    ArcRight,
}

impl Step {
    /// Classifies the move from `current` to `candidate`, or `None` if it is not a single step of
    /// any kind.
    pub fn classify(current: Waypoint, candidate: Waypoint) -> Option<Step> {
        let delta = (candidate.x - current.x, candidate.y - current.y);
        let heading = current.orientation;
        let ahead = heading.offset();
        match (delta, heading.turns_to(candidate.orientation)) {
            ((0, 0), 0) => None,
            ((0, 0), 1) => Some(Step::TurnLeft),
            ((0, 0), 2) => Some(Step::TurnAround),
            ((0, 0), _) => Some(Step::TurnRight),
            (d, 0) if d == ahead => Some(Step::Forward),
            (d, 0) if d == (-ahead.0, -ahead.1) => Some(Step::Reverse),
            (d, 1) if d == sum(ahead, heading.rotated(1).offset()) => Some(Step::ArcLeft),
            (d, 3) if d == sum(ahead, heading.rotated(3).offset()) => Some(Step::ArcRight),
            _ => None,
        }
    }
}

fn sum(a: (i32, i32), b: (i32, i32)) -> (i32, i32) {
    (a.0 + b.0, a.1 + b.1)
}

/// Movement model for an agent that can take a fixed set of [`Step`]s.
///
/// Straight moves cost 1. In-place turns cost `turn_cost`, and arcs cost `1 + turn_cost`, so a
/// step never costs less than the Manhattan distance it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementModel {
    steps: EnumSet<Step>,
    turn_cost: u32,
}

impl MovementModel {
    pub fn new(steps: EnumSet<Step>) -> Self {
        MovementModel {
            steps,
            turn_cost: 1,
        }
    }

    /// Every kind of step.
    ///
    /// Only the cell an arc lands on is checked against the grid, so an arc may cut the corner
    /// past a blocked cell ahead of or beside the agent. Validators that need the swept cells to
    /// be free should override [`TransitionValidator::is_valid_transition`] with their own grid
    /// lookup.
    pub fn all() -> Self {
        Self::new(EnumSet::all())
    }

    #[track_caller]
    pub fn with_turn_cost(mut self, turn_cost: u32) -> Self {
        assert!(turn_cost >= 1, "turn cost must be at least 1");
        self.turn_cost = turn_cost;
        self
    }

    pub fn steps(&self) -> EnumSet<Step> {
        self.steps
    }

    pub fn turn_cost(&self) -> u32 {
        self.turn_cost
    }

    pub fn allows(&self, step: Step) -> bool {
        self.steps.contains(step)
    }

    /// Cost of taking `step` under this model.
    pub fn cost_of(&self, step: Step) -> u32 {
        match step {
            Step::Forward | Step::Reverse => 1,
            Step::TurnLeft | Step::TurnRight | Step::TurnAround => self.turn_cost,
            Step::ArcLeft | Step::ArcRight => 1 + self.turn_cost,
        }
    }
}

/// Differential drive: straight moves both ways and quarter turns in place.
impl Default for MovementModel {
    fn default() -> Self {
        Self::new(Step::Forward | Step::Reverse | Step::TurnLeft | Step::TurnRight)
    }
}

impl TransitionValidator for MovementModel {
    fn is_valid_transition(&self, current: Waypoint, candidate: Waypoint) -> bool {
        Step::classify(current, candidate).is_some_and(|step| self.allows(step))
    }

    fn step_cost(&self, current: Waypoint, candidate: Waypoint) -> u32 {
        Step::classify(current, candidate).map_or(1, |step| self.cost_of(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation::*;

    #[test]
    fn classifies_every_step_kind() {
        let here = Waypoint::new(3, 3, East);
        let cases = [
            (Waypoint::new(4, 3, East), Some(Step::Forward)),
            (Waypoint::new(2, 3, East), Some(Step::Reverse)),
            (Waypoint::new(3, 3, North), Some(Step::TurnLeft)),
            (Waypoint::new(3, 3, South), Some(Step::TurnRight)),
            (Waypoint::new(3, 3, West), Some(Step::TurnAround)),
            (Waypoint::new(4, 4, North), Some(Step::ArcLeft)),
            (Waypoint::new(4, 2, South), Some(Step::ArcRight)),
            (Waypoint::new(3, 3, East), None),
            (Waypoint::new(3, 4, East), None),
            (Waypoint::new(4, 3, North), None),
            (Waypoint::new(4, 4, South), None),
            (Waypoint::new(2, 4, North), None),
        ];
        for (candidate, expected) in cases {
            assert_eq!(Step::classify(here, candidate), expected, "{candidate}");
        }
    }

    #[test]
    fn arcs_follow_heading() {
        let here = Waypoint::new(0, 0, North);
        assert_eq!(
            Step::classify(here, Waypoint::new(-1, 1, West)),
            Some(Step::ArcLeft)
        );
        assert_eq!(
            Step::classify(here, Waypoint::new(1, 1, East)),
            Some(Step::ArcRight)
        );
    }

    #[test]
    fn default_model_is_differential_drive() {
        let model = MovementModel::default();
        let here = Waypoint::new(1, 1, South);
        assert!(model.is_valid_transition(here, Waypoint::new(1, 0, South)));
        assert!(model.is_valid_transition(here, Waypoint::new(1, 2, South)));
        assert!(model.is_valid_transition(here, Waypoint::new(1, 1, East)));
        assert!(!model.is_valid_transition(here, Waypoint::new(1, 1, North)));
        assert!(!model.is_valid_transition(here, Waypoint::new(0, 0, West)));
        assert!(!model.is_valid_transition(here, here));
    }

    #[test]
    fn waypoint_validity_checks_bounds_and_obstacles() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set_blocked(1, 0, true);
        let model = MovementModel::default();
        assert!(model.is_valid_waypoint(Waypoint::new(0, 0, East), &grid));
        assert!(!model.is_valid_waypoint(Waypoint::new(1, 0, East), &grid));
        assert!(!model.is_valid_waypoint(Waypoint::new(2, 1, East), &grid));
    }

    #[test]
    fn turn_cost_applies_to_turns_and_arcs() {
        let model = MovementModel::all().with_turn_cost(3);
        let here = Waypoint::new(0, 0, East);
        assert_eq!(model.step_cost(here, Waypoint::new(1, 0, East)), 1);
        assert_eq!(model.step_cost(here, Waypoint::new(0, 0, North)), 3);
        assert_eq!(model.step_cost(here, Waypoint::new(1, 1, North)), 4);
    }
}
