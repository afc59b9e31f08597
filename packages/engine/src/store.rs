//! Ordered job store: a doubly linked chain of records kept in an arena.
//!
//! Nodes live in a slot vector and link to each other through
//! [`NodeHandle`]s rather than references. Unlinking repoints the neighbours
//! and the head/tail handles in one step; the vacated slot is recycled by a
//! later append.

use std::sync::Arc;

use crate::record::JobRecord;

/// Stable handle to a node in a [`JobStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

#[derive(Debug)]
struct Node {
    record: Arc<JobRecord>,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

/// Arrival-ordered chain of job records.
#[derive(Debug, Default)]
pub struct JobStore {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    len: usize,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail
    }

    /// Get the record held by a live node.
    pub fn get(&self, handle: NodeHandle) -> Option<&Arc<JobRecord>> {
        self.node(handle).map(|node| &node.record)
    }

    /// Handle of the node after `handle`, if any.
    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).and_then(|node| node.next)
    }

    /// Handle of the node before `handle`, if any.
    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).and_then(|node| node.prev)
    }

    /// Append a record at the tail.
    pub fn append(&mut self, record: Arc<JobRecord>) -> NodeHandle {
        let node = Node {
            record,
            prev: self.tail,
            next: None,
        };

        let handle = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeHandle(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeHandle(self.slots.len() - 1)
            }
        };

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.len += 1;
        handle
    }

    /// Detach a node and hand back its record.
    ///
    /// Works for interior nodes, the head, the tail and the sole node.
    /// Returns `None` if the handle does not refer to a live node.
    pub fn unlink(&mut self, handle: NodeHandle) -> Option<Arc<JobRecord>> {
        let node = self.slots.get_mut(handle.0)?.take()?;

        match node.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(handle.0);
        self.len -= 1;
        Some(node.record)
    }

    /// Traverse from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        self.iter_from(self.head)
    }

    /// Traverse forward starting at `start` (inclusive).
    pub fn iter_from(&self, start: Option<NodeHandle>) -> Iter<'_> {
        Iter {
            store: self,
            cursor: start,
            remaining: self.len,
            forward: true,
        }
    }

    /// Traverse from tail to head.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.tail,
            remaining: self.len,
            forward: false,
        }
    }

    fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }
}

/// Walk over the live nodes of a [`JobStore`].
///
/// Never yields more than `len` items, so a traversal always ends at the
/// last node even if it was started mid-chain.
pub struct Iter<'a> {
    store: &'a JobStore,
    cursor: Option<NodeHandle>,
    remaining: usize,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeHandle, &'a Arc<JobRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.cursor?;
        let node = self.store.node(handle)?;
        self.cursor = if self.forward { node.next } else { node.prev };
        self.remaining -= 1;
        Some((handle, &node.record))
    }
}

#[cfg(test)]
mod tests {
    use queue_core::{JobId, JobType};

    use super::*;

    fn record(id: u64) -> Arc<JobRecord> {
        Arc::new(JobRecord::new(JobId(id), JobType::Normal))
    }

    fn forward_ids(store: &JobStore) -> Vec<u64> {
        store.iter().map(|(_, r)| r.id().get()).collect()
    }

    fn backward_ids(store: &JobStore) -> Vec<u64> {
        store.iter_rev().map(|(_, r)| r.id().get()).collect()
    }

    fn assert_consistent(store: &JobStore, expected: &[u64]) {
        assert_eq!(forward_ids(store), expected);
        let mut reversed = expected.to_vec();
        reversed.reverse();
        assert_eq!(backward_ids(store), reversed);
        assert_eq!(store.len(), expected.len());
        assert_eq!(store.is_empty(), expected.is_empty());
    }

    fn filled(n: u64) -> (JobStore, Vec<NodeHandle>) {
        let mut store = JobStore::new();
        let handles = (1..=n).map(|id| store.append(record(id))).collect();
        (store, handles)
    }

    #[test]
    fn append_preserves_arrival_order() {
        let (store, handles) = filled(3);
        assert_consistent(&store, &[1, 2, 3]);
        assert_eq!(store.head(), Some(handles[0]));
        assert_eq!(store.tail(), Some(handles[2]));
        assert_eq!(store.prev(handles[0]), None);
        assert_eq!(store.next(handles[2]), None);
    }

    #[test]
    fn unlink_interior_node() {
        let (mut store, handles) = filled(3);
        let removed = store.unlink(handles[1]).map(|r| r.id());
        assert_eq!(removed, Some(JobId(2)));
        assert_consistent(&store, &[1, 3]);
        assert_eq!(store.next(handles[0]), Some(handles[2]));
        assert_eq!(store.prev(handles[2]), Some(handles[0]));
    }

    #[test]
    fn unlink_head_moves_head() {
        let (mut store, handles) = filled(3);
        store.unlink(handles[0]);
        assert_consistent(&store, &[2, 3]);
        assert_eq!(store.head(), Some(handles[1]));
        assert_eq!(store.prev(handles[1]), None);
    }

    #[test]
    fn unlink_tail_moves_tail() {
        let (mut store, handles) = filled(3);
        store.unlink(handles[2]);
        assert_consistent(&store, &[1, 2]);
        assert_eq!(store.tail(), Some(handles[1]));
        assert_eq!(store.next(handles[1]), None);
    }

    #[test]
    fn unlink_sole_node_empties_store() {
        let (mut store, handles) = filled(1);
        assert!(store.unlink(handles[0]).is_some());
        assert_consistent(&store, &[]);
        assert_eq!(store.head(), None);
        assert_eq!(store.tail(), None);
    }

    #[test]
    fn unlink_twice_is_rejected() {
        let (mut store, handles) = filled(2);
        assert!(store.unlink(handles[0]).is_some());
        assert!(store.unlink(handles[0]).is_none());
        assert_consistent(&store, &[2]);
    }

    #[test]
    fn recycled_slot_is_appended_at_tail() {
        let (mut store, handles) = filled(3);
        store.unlink(handles[0]);
        let reused = store.append(record(4));
        assert_eq!(reused, handles[0]);
        assert_consistent(&store, &[2, 3, 4]);
        assert_eq!(store.tail(), Some(reused));
    }

    #[test]
    fn iter_from_stops_at_tail() {
        let (store, handles) = filled(4);
        let rest: Vec<u64> = store
            .iter_from(store.next(handles[1]))
            .map(|(_, r)| r.id().get())
            .collect();
        assert_eq!(rest, vec![3, 4]);
        assert_eq!(store.iter_from(store.next(handles[3])).count(), 0);
    }

    #[test]
    fn traversal_is_restartable() {
        let (store, _) = filled(3);
        assert_eq!(store.iter().count(), 3);
        assert_eq!(store.iter().count(), 3);
    }
}
