//! # Freshness Queue
//!
//! A binary min-heap of shelf items with an id index for O(1) lookup and
//! O(log n) removal from any position.
//!
//! Items live in an arena of slots addressed by stable handles. The heap holds
//! handles (with their sort key inline), each slot records its current heap
//! position, and the index maps order ids to handles. Every heap swap updates
//! the two slots it moved, so `index`, `slots` and `heap` always describe the
//! same set of items.
//!
//! Ordering key is the item's deadline, ties broken by insertion sequence, so
//! the head is always the item closest to (or furthest past) spoiling and
//! `peek` agrees with the next `pop`.

use crate::model::ShelfItem;
use crate::shelf::ShelfError;
use std::collections::HashMap;
use tokio::time::Instant;

type Key = (Instant, u64);

#[derive(Debug)]
struct Slot {
    item: ShelfItem,
    pos: usize,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    key: Key,
    handle: usize,
}

#[derive(Debug, Default)]
pub struct FreshnessQueue {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    heap: Vec<Node>,
    index: HashMap<String, usize>,
    next_seq: u64,
}

impl FreshnessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ShelfItem> {
        self.index.get(id).map(|&handle| &self.slot(handle).item)
    }

    pub fn push(&mut self, item: ShelfItem) -> Result<(), ShelfError> {
        if self.index.contains_key(item.id()) {
            return Err(ShelfError::DuplicateId(item.id().to_string()));
        }

        let key = (item.deadline(), self.next_seq);
        self.next_seq += 1;

        let pos = self.heap.len();
        let id = item.id().to_string();
        let slot = Slot { item, pos };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(slot);
                handle
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        self.heap.push(Node { key, handle });
        self.index.insert(id, handle);
        self.sift_up(pos);
        Ok(())
    }

    pub fn peek(&self) -> Option<&ShelfItem> {
        self.heap.first().map(|node| &self.slot(node.handle).item)
    }

    pub fn pop(&mut self) -> Option<ShelfItem> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    pub fn remove(&mut self, id: &str) -> Option<ShelfItem> {
        let handle = *self.index.get(id)?;
        let pos = self.slot(handle).pos;
        Some(self.remove_at(pos))
    }

    /// The item at heap position `pos`, for index-based random picks.
    pub fn at(&self, pos: usize) -> Option<&ShelfItem> {
        self.heap.get(pos).map(|node| &self.slot(node.handle).item)
    }

    /// Residents in pop order.
    pub fn sorted(&self) -> Vec<ShelfItem> {
        let mut nodes = self.heap.clone();
        nodes.sort_by_key(|node| node.key);
        nodes
            .into_iter()
            .map(|node| self.slot(node.handle).item.clone())
            .collect()
    }

    fn remove_at(&mut self, pos: usize) -> ShelfItem {
        let last = self.heap.len() - 1;
        self.swap(pos, last);

        let node = match self.heap.pop() {
            Some(node) => node,
            None => unreachable!("remove_at on an empty heap"),
        };
        let slot = match self.slots[node.handle].take() {
            Some(slot) => slot,
            None => unreachable!("heap handle {} points at a free slot", node.handle),
        };
        self.free.push(node.handle);
        self.index.remove(slot.item.id());

        if pos < self.heap.len() {
            self.sift_down(pos);
            self.sift_up(pos);
        }
        slot.item
    }

    fn slot(&self, handle: usize) -> &Slot {
        match self.slots.get(handle) {
            Some(Some(slot)) => slot,
            _ => unreachable!("heap handle {} points at a free slot", handle),
        }
    }

    fn set_pos(&mut self, pos: usize) {
        let handle = self.heap[pos].handle;
        match self.slots.get_mut(handle) {
            Some(Some(slot)) => slot.pos = pos,
            _ => unreachable!("heap handle {} points at a free slot", handle),
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.set_pos(a);
        self.set_pos(b);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].key < self.heap[b].key
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        assert_eq!(self.heap.len(), self.index.len());
        for (pos, node) in self.heap.iter().enumerate() {
            let slot = self.slot(node.handle);
            assert_eq!(slot.pos, pos, "slot position out of sync");
            assert_eq!(self.index.get(slot.item.id()), Some(&node.handle));
            if pos > 0 {
                assert!(self.heap[(pos - 1) / 2].key <= node.key, "heap order broken");
            }
        }
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.heap.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;

    fn item(id: &str, budget: i64, now: Instant) -> ShelfItem {
        ShelfItem::new(Order::new(id, "Item", "hot", 60, 0.0), now, budget)
    }

    #[tokio::test(start_paused = true)]
    async fn test_pop_returns_smallest_budget() {
        let now = Instant::now();
        let mut queue = FreshnessQueue::new();
        queue.push(item("a", 30, now)).unwrap();
        queue.push(item("b", 10, now)).unwrap();
        queue.push(item("c", 20, now)).unwrap();

        assert_eq!(queue.pop().unwrap().max_life_time_s, 10);

        queue.push(item("d", 1, now)).unwrap();
        assert_eq!(queue.peek().unwrap().id(), "d");
        queue.check_invariants();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ties_pop_in_insertion_order() {
        let now = Instant::now();
        let mut queue = FreshnessQueue::new();
        for id in ["a", "b", "c"] {
            queue.push(item(id, 5, now)).unwrap();
        }
        let peeked = queue.peek().unwrap().id().to_string();
        assert_eq!(queue.pop().unwrap().id(), peeked);
        assert_eq!(peeked, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_id_is_rejected() {
        let now = Instant::now();
        let mut queue = FreshnessQueue::new();
        queue.push(item("a", 5, now)).unwrap();
        assert_eq!(
            queue.push(item("a", 1, now)),
            Err(ShelfError::DuplicateId("a".to_string()))
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek().unwrap().max_life_time_s, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_from_middle_keeps_order() {
        let now = Instant::now();
        let mut queue = FreshnessQueue::new();
        for (i, budget) in [50, 3, 41, 8, 17, 99, 1, 23].into_iter().enumerate() {
            queue.push(item(&format!("o{i}"), budget, now)).unwrap();
        }

        assert_eq!(queue.remove("o4").unwrap().max_life_time_s, 17);
        assert!(queue.remove("o4").is_none());
        assert!(!queue.contains("o4"));
        queue.check_invariants();

        let drained: Vec<i64> = std::iter::from_fn(|| queue.pop())
            .map(|i| i.max_life_time_s)
            .collect();
        assert_eq!(drained, vec![1, 3, 8, 23, 41, 50, 99]);
        queue.check_invariants();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slots_are_reused() {
        let now = Instant::now();
        let mut queue = FreshnessQueue::new();
        for round in 0..20 {
            for i in 0..5 {
                queue.push(item(&format!("r{round}-{i}"), (i * 7 % 5) as i64, now)).unwrap();
            }
            queue.remove(&format!("r{round}-2"));
            queue.pop();
            queue.check_invariants();
        }
        assert_eq!(queue.len(), 60);
        assert!(queue.slots.len() <= 62);
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_deadline_beats_smaller_budget() {
        let start = Instant::now();
        let mut queue = FreshnessQueue::new();
        queue.push(item("old", 10, start)).unwrap();

        tokio::time::advance(std::time::Duration::from_secs(8)).await;
        queue.push(item("new", 5, Instant::now())).unwrap();

        // "old" spoils at +10s, "new" at +13s.
        assert_eq!(queue.peek().unwrap().id(), "old");
        assert_eq!(
            queue.sorted().iter().map(|i| i.id()).collect::<Vec<_>>(),
            vec!["old", "new"]
        );
    }
}
