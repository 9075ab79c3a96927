use core::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::{HuffmanError, frequency::FrequencyTable, tree::Node};

/// Min-priority queue of tree nodes keyed by weight.
///
/// Equal weights come out in insertion order, so the resulting tree does not depend on
/// symbol identity beyond the order in which leaves were inserted.
#[derive(Debug, Default)]
pub struct MinQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
    }
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a queue with one leaf per weighted symbol, in ascending symbol order.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut queue = Self::new();
        for (symbol, weight) in frequencies.iter() {
            queue.insert(Node::leaf(symbol, weight));
        }
        queue
    }

    pub fn insert(&mut self, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            weight: node.weight(),
            seq,
            node,
        }));
    }

    /// Removes the lightest node; among equal weights, the one inserted first.
    ///
    /// # Errors
    ///
    /// Returns [`HuffmanError::EmptyQueue`] if the queue holds nothing.
    pub fn extract_min(&mut self) -> Result<Node, HuffmanError> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.node)
            .ok_or(HuffmanError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
