/// What to do when a successor is already waiting in the open list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenPolicy {
    /// Keep the first-discovered cost and parent, even if the new route is cheaper.
    ///
    /// Cheaper routes found later are lost, so paths are not guaranteed to be optimal.
    #[default]
    KeepFirst,
    /// Replace the cost and parent when the new route is strictly cheaper. The node keeps its
    /// tie-breaking position.
    Relax,
}

/// Open list implementation used by [`PathFinder`](crate::PathFinder).
///
/// Both select the same node every iteration and so return the same paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueueKind {
    /// Binary heap, `O(log n)` per operation.
    #[default]
    Heap,
    /// Linear scan in insertion order, `O(n)` per operation.
    Scan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub open_policy: OpenPolicy,
    pub queue: QueueKind,
    /// Maximum number of nodes to expand before giving up. `None` searches until the goal is
    /// reached or the open list runs dry.
    pub expansion_limit: Option<usize>,
    /// Reject start and goal waypoints the validator considers invalid before searching.
    pub validate_endpoints: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            open_policy: OpenPolicy::KeepFirst,
            queue: QueueKind::Heap,
            expansion_limit: None,
            validate_endpoints: true,
        }
    }
}

impl SearchConfig {
    pub fn with_open_policy(mut self, open_policy: OpenPolicy) -> Self {
        self.open_policy = open_policy;
        self
    }

    pub fn with_queue(mut self, queue: QueueKind) -> Self {
        self.queue = queue;
        self
    }

    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn without_endpoint_validation(mut self) -> Self {
        self.validate_endpoints = false;
        self
    }
}
