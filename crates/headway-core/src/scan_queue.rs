use crate::node::NodeId;
use crate::traits::OpenList;

/// Open list kept in insertion order and searched linearly.
///
/// Selection takes the first entry with the smallest `f`. Since nodes are inserted in the order
/// they are discovered, this picks the same node as [`PriorityQueue`](crate::PriorityQueue), at
/// `O(n)` per operation.
#[derive(Default)]
pub struct ScanQueue {
    entries: Vec<(NodeId, u32)>,
}

impl ScanQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OpenList for ScanQueue {
    fn relaxed(&mut self, node: NodeId, f: u32) {
        match self.entries.iter_mut().find(|(id, _)| *id == node) {
            Some(entry) => entry.1 = f,
            None => self.entries.push((node, f)),
        }
    }

    fn next(&mut self) -> Option<NodeId> {
        let mut best: Option<(usize, u32)> = None;
        for (index, &(_, f)) in self.entries.iter().enumerate() {
            if best.map_or(true, |(_, best_f)| f < best_f) {
                best = Some((index, f));
            }
        }
        best.map(|(index, _)| self.entries.remove(index).0)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[test]
fn first_minimum_wins() {
    let mut arena = crate::NodeArena::new();
    let ids: Vec<_> = (0..4).map(|i| arena.alloc(i)).collect();

    let mut queue = ScanQueue::new();
    queue.relaxed(ids[0], 3);
    queue.relaxed(ids[1], 1);
    queue.relaxed(ids[2], 1);
    queue.relaxed(ids[3], 2);
    queue.relaxed(ids[0], 1);

    assert_eq!(queue.len(), 4);
    let order: Vec<_> = std::iter::from_fn(|| queue.next()).collect();
    assert_eq!(order, vec![ids[0], ids[1], ids[2], ids[3]]);
}
