use crate::NodeId;

pub trait Expander<S> {
    type Edge;

    fn expand(&mut self, state: S, edges: &mut Vec<Self::Edge>);
}

pub trait Successor<S> {
    fn successor(&self) -> S;
}

pub trait Cost {
    fn cost(&self) -> u32;
}

/// Open list ordered by `(f, NodeId)`.
///
/// Node ids are allocated in discovery order, so ties on `f` go to whichever node was discovered
/// first.
pub trait OpenList {
    /// Inserts `node` with priority `f`, or lowers its priority if it is already queued.
    fn relaxed(&mut self, node: NodeId, f: u32);

    fn next(&mut self) -> Option<NodeId>;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Estimate of the remaining cost from `state` to `goal`.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S, goal: &S) -> u32;
}

impl<S, F: Fn(&S, &S) -> u32> Heuristic<S> for F {
    fn estimate(&self, state: &S, goal: &S) -> u32 {
        self(state, goal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedEdge<S> {
    pub successor: S,
    pub cost: u32,
}

impl<S: Copy> Successor<S> for WeightedEdge<S> {
    fn successor(&self) -> S {
        self.successor
    }
}

impl<S> Cost for WeightedEdge<S> {
    fn cost(&self) -> u32 {
        self.cost
    }
}
