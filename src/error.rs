use headway_grid::Waypoint;
use thiserror::Error;

/// Reasons a search could not be carried out.
///
/// Failing to find a route is not one of them; that is reported as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("start waypoint {0} is off the grid or on an obstacle")]
    InvalidStart(Waypoint),

    #[error("goal waypoint {0} is off the grid or on an obstacle")]
    InvalidGoal(Waypoint),

    #[error("search abandoned after expanding {limit} nodes")]
    ExpansionLimit { limit: usize },
}

pub type Result<T, E = PlanError> = std::result::Result<T, E>;
