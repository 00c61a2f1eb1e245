use std::ops::{Index, IndexMut};

/// Index of a node within a [`NodeArena`].
///
/// Ids are handed out densely in allocation order, so comparing two ids tells you which node was
/// discovered first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    Closed,
}

/// Search-time bookkeeping for a single state.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub parent: Option<NodeId>,
    pub status: NodeStatus,
}

/// Dense storage of search nodes.
///
/// Parent links are stored as [`NodeId`]s into the same arena, so walking backwards from a node
/// never needs shared ownership.
pub struct NodeArena<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S: Copy> NodeArena<S> {
    pub fn new() -> Self {
        NodeArena { nodes: vec![] }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[track_caller]
    pub fn alloc(&mut self, state: S) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena exceeds u32::MAX nodes");
        self.nodes.push(SearchNode {
            state,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
            status: NodeStatus::Open,
        });
        NodeId(id)
    }

    /// Walks parent links back from `id` and returns the states from the root to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<S> {
        let mut path = vec![self[id].state];
        let mut node = id;
        while let Some(parent) = self[node].parent {
            path.push(self[parent].state);
            node = parent;
        }
        path.reverse();
        path
    }
}

impl<S: Copy> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Index<NodeId> for NodeArena<S> {
    type Output = SearchNode<S>;

    #[track_caller]
    #[inline(always)]
    fn index(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }
}

impl<S> IndexMut<NodeId> for NodeArena<S> {
    #[track_caller]
    #[inline(always)]
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_allocation_order() {
        let mut arena = NodeArena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        assert!(a < b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[b].state, 'b');
        assert_eq!(arena[a].status, NodeStatus::Open);
    }

    #[test]
    fn path_walks_parents_from_root() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(0);
        let mid = arena.alloc(1);
        let leaf = arena.alloc(2);
        arena[mid].parent = Some(root);
        arena[leaf].parent = Some(mid);
        assert_eq!(arena.path_to(leaf), vec![0, 1, 2]);
        assert_eq!(arena.path_to(root), vec![0]);
    }

    #[test]
    fn reset_discards_nodes() {
        let mut arena = NodeArena::new();
        arena.alloc(());
        arena.reset();
        assert!(arena.is_empty());
    }
}
