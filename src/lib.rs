//! Shortest paths of oriented waypoints across an occupancy grid.
//!
//! ```
//! use headway::grid::{OccupancyGrid, Orientation, Waypoint};
//!
//! let grid: OccupancyGrid = "...\n.#.\n...".parse().unwrap();
//! let start = Waypoint::new(0, 0, Orientation::East);
//! let goal = Waypoint::new(2, 2, Orientation::East);
//! let path = headway::find_path(&grid, start, goal).unwrap();
//! assert_eq!(path.first(), Some(&start));
//! assert_eq!(path.last(), Some(&goal));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use headway_core::traits::{Cost, Expander, Heuristic, OpenList, Successor};
use headway_grid::{
    ManhattanDistance, MovementModel, OccupancyGrid, OrientedExpander, TransitionValidator,
    Waypoint,
};
use log::{debug, trace, warn};

pub use headway_core::*;
pub use headway_grid as grid;

mod config;
mod error;

pub use self::config::*;
pub use self::error::*;

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expanded: usize,
    /// Nodes created, including the start node.
    pub generated: usize,
    /// Open nodes whose cost was lowered after discovery.
    pub relaxed: usize,
    /// Cost of the returned path, if one was found.
    pub path_cost: Option<u32>,
}

/// Best-first search over any hashable state space.
///
/// The searcher owns its node pool, so repeated searches reuse the allocation.
pub struct AStarSearcher<S> {
    pool: HashPool<S>,
    policy: OpenPolicy,
    stats: SearchStats,
}

impl<S: Copy + Eq + Hash + Debug> AStarSearcher<S> {
    pub fn new(policy: OpenPolicy) -> Self {
        AStarSearcher {
            pool: HashPool::new(),
            policy,
            stats: SearchStats::default(),
        }
    }

    pub fn policy(&self) -> OpenPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OpenPolicy) {
        self.policy = policy;
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches from `start` until a node whose state equals `goal` is selected for expansion.
    ///
    /// Returns the states from `start` to `goal` inclusive, or `Ok(None)` once the open list is
    /// exhausted. `limit` caps the number of expansions.
    pub fn search<Exp, Open, Edge>(
        &mut self,
        mut expander: Exp,
        open_list: &mut Open,
        heuristic: &impl Heuristic<S>,
        start: S,
        goal: S,
        limit: Option<usize>,
    ) -> Result<Option<Vec<S>>>
    where
        Exp: Expander<S, Edge = Edge>,
        Edge: Successor<S> + Cost,
        Open: OpenList,
    {
        let AStarSearcher {
            ref mut pool,
            policy,
            ref mut stats,
        } = *self;

        pool.reset();
        open_list.clear();
        *stats = SearchStats::default();

        let mut edges = vec![];

        let (start_id, _) = pool.generate(start);
        stats.generated += 1;
        open_list.relaxed(start_id, 0);

        while let Some(id) = open_list.next() {
            pool[id].status = NodeStatus::Closed;
            let node = &pool[id];
            let (state, node_g) = (node.state, node.g);
            trace!("pop {state:?} g={node_g} f={}", node.f);

            if state == goal {
                stats.path_cost = Some(node_g);
                return Ok(Some(pool.path_to(id)));
            }

            if let Some(limit) = limit {
                if stats.expanded >= limit {
                    debug!("giving up after {limit} expansions");
                    return Err(PlanError::ExpansionLimit { limit });
                }
            }
            stats.expanded += 1;

            edges.clear();
            expander.expand(state, &mut edges);

            for edge in &edges {
                let successor = edge.successor();
                let new_g = node_g + edge.cost();
                match pool.get(&successor) {
                    None => {
                        let (succ_id, _) = pool.generate(successor);
                        let h = heuristic.estimate(&successor, &goal);
                        let succ = &mut pool[succ_id];
                        succ.g = new_g;
                        succ.h = h;
                        succ.f = new_g + h;
                        succ.parent = Some(id);
                        stats.generated += 1;
                        open_list.relaxed(succ_id, new_g + h);
                    }
                    Some(succ_id) => {
                        let succ = &mut pool[succ_id];
                        if succ.status == NodeStatus::Closed
                            || policy == OpenPolicy::KeepFirst
                            || new_g >= succ.g
                        {
                            continue;
                        }
                        succ.g = new_g;
                        succ.f = new_g + succ.h;
                        succ.parent = Some(id);
                        stats.relaxed += 1;
                        open_list.relaxed(succ_id, succ.f);
                    }
                }
            }
        }

        Ok(None)
    }
}

impl<S: Copy + Eq + Hash + Debug> Default for AStarSearcher<S> {
    fn default() -> Self {
        Self::new(OpenPolicy::default())
    }
}

/// Plans waypoint paths on an [`OccupancyGrid`] under a movement model.
///
/// A `PathFinder` keeps its node pool and open lists between calls, so reusing one for many
/// queries avoids reallocating them.
pub struct PathFinder<V = MovementModel, H = ManhattanDistance> {
    validator: V,
    heuristic: H,
    config: SearchConfig,
    searcher: AStarSearcher<Waypoint>,
    heap: PriorityQueue,
    scan: ScanQueue,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::with_validator(MovementModel::default())
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TransitionValidator> PathFinder<V> {
    pub fn with_validator(validator: V) -> Self {
        let config = SearchConfig::default();
        PathFinder {
            validator,
            heuristic: ManhattanDistance,
            config,
            searcher: AStarSearcher::new(config.open_policy),
            heap: PriorityQueue::new(),
            scan: ScanQueue::new(),
        }
    }
}

impl<V: TransitionValidator, H: Heuristic<Waypoint>> PathFinder<V, H> {
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.searcher.set_policy(config.open_policy);
        self.config = config;
        self
    }

    /// Replaces the heuristic. It should never overestimate the movement model's step costs, or
    /// returned paths may not be shortest.
    pub fn with_heuristic<H2: Heuristic<Waypoint>>(self, heuristic: H2) -> PathFinder<V, H2> {
        PathFinder {
            validator: self.validator,
            heuristic,
            config: self.config,
            searcher: self.searcher,
            heap: self.heap,
            scan: self.scan,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Counters from the last call to [`plan`](Self::plan). A call rejected before searching
    /// leaves them all at zero.
    pub fn stats(&self) -> SearchStats {
        self.searcher.stats()
    }

    /// Finds a path from `start` to `goal`, both included.
    ///
    /// The goal is only reached when both its cell and its heading match. `Ok(None)` means every
    /// reachable waypoint was explored without arriving there.
    pub fn plan(
        &mut self,
        grid: &OccupancyGrid,
        start: Waypoint,
        goal: Waypoint,
    ) -> Result<Option<Vec<Waypoint>>> {
        self.searcher.stats = SearchStats::default();
        if self.config.validate_endpoints {
            if !self.validator.is_valid_waypoint(start, grid) {
                return Err(PlanError::InvalidStart(start));
            }
            if !self.validator.is_valid_waypoint(goal, grid) {
                return Err(PlanError::InvalidGoal(goal));
            }
        }

        debug!(
            "planning {start} -> {goal} on {}x{} grid",
            grid.width(),
            grid.height()
        );

        let expander = OrientedExpander::new(grid, &self.validator);
        let limit = self.config.expansion_limit;
        let result = match self.config.queue {
            QueueKind::Heap => {
                self.searcher
                    .search(expander, &mut self.heap, &self.heuristic, start, goal, limit)
            }
            QueueKind::Scan => {
                self.searcher
                    .search(expander, &mut self.scan, &self.heuristic, start, goal, limit)
            }
        };

        let stats = self.searcher.stats();
        match &result {
            Ok(Some(path)) => debug!(
                "found path of {} waypoints, cost {:?}, {} expanded, {} generated",
                path.len(),
                stats.path_cost,
                stats.expanded,
                stats.generated
            ),
            Ok(None) => debug!(
                "no path from {start} to {goal}, {} expanded",
                stats.expanded
            ),
            Err(_) => {}
        }
        result
    }

    /// Like [`plan`](Self::plan), but folds every failure into `None`.
    pub fn find_path(
        &mut self,
        grid: &OccupancyGrid,
        start: Waypoint,
        goal: Waypoint,
    ) -> Option<Vec<Waypoint>> {
        match self.plan(grid, start, goal) {
            Ok(path) => path,
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }
}

/// Finds a path under the default differential-drive movement model.
///
/// Returns `None` if there is no route, or if `start` or `goal` is off the grid or blocked.
pub fn find_path(grid: &OccupancyGrid, start: Waypoint, goal: Waypoint) -> Option<Vec<Waypoint>> {
    PathFinder::new().find_path(grid, start, goal)
}
