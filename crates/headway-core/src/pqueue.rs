use crate::node::NodeId;
use crate::traits::OpenList;

const NOT_QUEUED: usize = usize::MAX;

/// Binary heap open list with in-place decrease-key.
///
/// Entries are ordered by `(f, NodeId)`. The heap position of every queued node is tracked in a
/// dense side table indexed by node id, so re-relaxing a queued node sifts it up from where it
/// is instead of pushing a duplicate.
#[derive(Default)]
pub struct PriorityQueue {
    heap: Vec<(u32, NodeId)>,
    position: Vec<usize>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.position
            .get(node.index())
            .is_some_and(|&index| index != NOT_QUEUED)
    }

    fn sift_up(&mut self, entry: (u32, NodeId), mut index: usize) {
        while index > 0 {
            let parent_index = (index - 1) / 2;
            let parent = self.heap[parent_index];
            if parent <= entry {
                break;
            }
            self.heap[index] = parent;
            self.position[parent.1.index()] = index;
            index = parent_index;
        }
        self.heap[index] = entry;
        self.position[entry.1.index()] = index;
    }

    fn sift_down(&mut self, entry: (u32, NodeId), mut index: usize) {
        loop {
            let child_1_index = index * 2 + 1;
            if child_1_index >= self.heap.len() {
                break;
            }
            let child_1 = self.heap[child_1_index];

            let child_2_index = child_1_index + 1;
            let (child_index, child) = match self.heap.get(child_2_index) {
                Some(&child_2) if child_2 < child_1 => (child_2_index, child_2),
                _ => (child_1_index, child_1),
            };

            if entry <= child {
                break;
            }

            self.heap[index] = child;
            self.position[child.1.index()] = index;
            index = child_index;
        }

        self.heap[index] = entry;
        self.position[entry.1.index()] = index;
    }
}

impl OpenList for PriorityQueue {
    fn relaxed(&mut self, node: NodeId, f: u32) {
        if node.index() >= self.position.len() {
            self.position.resize(node.index() + 1, NOT_QUEUED);
        }
        let entry = (f, node);
        match self.position[node.index()] {
            NOT_QUEUED => {
                self.heap.push(entry);
                self.sift_up(entry, self.heap.len() - 1);
            }
            index => {
                debug_assert!(f <= self.heap[index].0, "relaxed node must not get worse");
                self.sift_up(entry, index);
            }
        }
    }

    fn next(&mut self) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let (_, ret) = self.heap.swap_remove(0);
        self.position[ret.index()] = NOT_QUEUED;
        if let Some(&entry) = self.heap.first() {
            self.sift_down(entry, 0);
        }
        Some(ret)
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.position.clear();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeArena;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut arena = NodeArena::new();
        (0..n).map(|i| arena.alloc(i)).collect()
    }

    #[test]
    fn pops_lowest_f_then_lowest_id() {
        let ids = ids(5);
        let mut queue = PriorityQueue::new();
        queue.relaxed(ids[3], 4);
        queue.relaxed(ids[1], 2);
        queue.relaxed(ids[4], 2);
        queue.relaxed(ids[0], 7);
        queue.relaxed(ids[2], 2);

        let order: Vec<_> = std::iter::from_fn(|| queue.next()).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[4], ids[3], ids[0]]);
    }

    #[test]
    fn relaxing_moves_node_forward() {
        let ids = ids(3);
        let mut queue = PriorityQueue::new();
        queue.relaxed(ids[0], 5);
        queue.relaxed(ids[1], 6);
        queue.relaxed(ids[2], 9);
        queue.relaxed(ids[2], 1);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next(), Some(ids[2]));
        assert!(!queue.contains(ids[2]));
        assert!(queue.contains(ids[0]));
    }

    #[test]
    fn clear_empties_queue() {
        let ids = ids(2);
        let mut queue = PriorityQueue::new();
        queue.relaxed(ids[0], 0);
        queue.relaxed(ids[1], 0);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next(), None);
        assert!(!queue.contains(ids[0]));
    }
}
