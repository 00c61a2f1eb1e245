use std::hash::Hash;
use std::ops::{Index, IndexMut};

use ahash::AHashMap;

use crate::node::{NodeArena, NodeId, SearchNode};

/// Node pool keyed by state.
///
/// Each distinct state maps to at most one node for the lifetime of a search, which is what makes
/// open/closed membership a hash lookup rather than a scan.
pub struct HashPool<S> {
    arena: NodeArena<S>,
    map: AHashMap<S, NodeId>,
}

impl<S: Copy + Hash + Eq> HashPool<S> {
    pub fn new() -> Self {
        HashPool {
            arena: NodeArena::new(),
            map: AHashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.map.clear();
        self.arena.reset();
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the node for `state`, allocating it if this is the first time it is seen. The
    /// boolean is `true` when the node was freshly allocated.
    pub fn generate(&mut self, state: S) -> (NodeId, bool) {
        let arena = &mut self.arena;
        let mut fresh = false;
        let id = *self.map.entry(state).or_insert_with(|| {
            fresh = true;
            arena.alloc(state)
        });
        (id, fresh)
    }

    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.map.get(state).copied()
    }

    pub fn path_to(&self, id: NodeId) -> Vec<S> {
        self.arena.path_to(id)
    }
}

impl<S: Copy + Hash + Eq> Default for HashPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Index<NodeId> for HashPool<S> {
    type Output = SearchNode<S>;

    #[track_caller]
    fn index(&self, id: NodeId) -> &SearchNode<S> {
        &self.arena[id]
    }
}

impl<S> IndexMut<NodeId> for HashPool<S> {
    #[track_caller]
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.arena[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_node_per_state() {
        let mut pool = HashPool::new();
        let (a, fresh_a) = pool.generate((1, 2));
        let (b, fresh_b) = pool.generate((1, 2));
        let (c, fresh_c) = pool.generate((2, 1));
        assert!(fresh_a);
        assert!(!fresh_b);
        assert!(fresh_c);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(&(2, 1)), Some(c));
        assert_eq!(pool.get(&(0, 0)), None);
    }

    #[test]
    fn reset_forgets_states() {
        let mut pool = HashPool::new();
        pool.generate(7u8);
        pool.reset();
        assert!(pool.is_empty());
        assert_eq!(pool.get(&7), None);
        assert!(pool.generate(7).1);
    }
}
