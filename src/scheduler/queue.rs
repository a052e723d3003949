/*!
 * Ready Queue
 * FIFO or keyed min-heap holding indices into the run's process table
 */

use super::types::QueueOrder;
use crate::core::types::Tick;
use crate::process::ProcessRecord;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Keyed queue entry
///
/// Key and entry time are snapshots taken at insertion; anything that
/// mutates a queued process's key must call [`ReadyQueue::rekey`].
#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u64,
    ready_at: Tick,
    seq: u64,
    slot: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse so the smallest key pops first,
        // then the earliest entry time, then the earliest insertion
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.ready_at.cmp(&self.ready_at))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
enum Slots {
    Fifo(VecDeque<usize>),
    Keyed(BinaryHeap<Entry>),
}

/// Processes eligible for the CPU, ordered per the active algorithm
#[derive(Debug, Clone)]
pub(crate) struct ReadyQueue {
    order: QueueOrder,
    slots: Slots,
    next_seq: u64,
}

impl ReadyQueue {
    pub fn new(order: QueueOrder, capacity: usize) -> Self {
        let slots = match order {
            QueueOrder::Fifo => Slots::Fifo(VecDeque::with_capacity(capacity)),
            _ => Slots::Keyed(BinaryHeap::with_capacity(capacity)),
        };
        Self {
            order,
            slots,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, slot: usize, process: &ProcessRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        match &mut self.slots {
            Slots::Fifo(queue) => queue.push_back(slot),
            Slots::Keyed(heap) => heap.push(Entry {
                key: self.order.key(process).unwrap_or_default(),
                ready_at: process.ready_queue_time(),
                seq,
                slot,
            }),
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        match &mut self.slots {
            Slots::Fifo(queue) => queue.pop_front(),
            Slots::Keyed(heap) => heap.pop().map(|e| e.slot),
        }
    }

    pub fn peek(&self) -> Option<usize> {
        match &self.slots {
            Slots::Fifo(queue) => queue.front().copied(),
            Slots::Keyed(heap) => heap.peek().map(|e| e.slot),
        }
    }

    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Fifo(queue) => queue.len(),
            Slots::Keyed(heap) => heap.len(),
        }
    }

    /// Queued slots in dequeue order
    pub fn slots(&self) -> Vec<usize> {
        match &self.slots {
            Slots::Fifo(queue) => queue.iter().copied().collect(),
            Slots::Keyed(heap) => {
                let mut entries: Vec<&Entry> = heap.iter().collect();
                entries.sort_by(|a, b| b.cmp(a));
                entries.into_iter().map(|e| e.slot).collect()
            }
        }
    }

    /// Refresh keys after queued processes were mutated in place
    ///
    /// Heap has to be rebuilt; insertion sequence is kept so ties resolve
    /// the same way as before the mutation.
    pub fn rekey(&mut self, processes: &[ProcessRecord]) {
        let order = self.order;
        if let Slots::Keyed(heap) = &mut self.slots {
            let entries: Vec<Entry> = heap
                .drain()
                .map(|mut e| {
                    e.key = order.key(&processes[e.slot]).unwrap_or_default();
                    e
                })
                .collect();
            heap.extend(entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessSpec;
    use pretty_assertions::assert_eq;

    fn table(specs: &[(u32, u32, u32)]) -> Vec<ProcessRecord> {
        specs
            .iter()
            .map(|&(pid, burst, prio)| {
                ProcessRecord::new(ProcessSpec::new(pid, 0, burst).with_priority(prio))
            })
            .collect()
    }

    #[test]
    fn test_fifo_order() {
        let procs = table(&[(1, 9, 0), (2, 1, 0), (3, 5, 0)]);
        let mut queue = ReadyQueue::new(QueueOrder::Fifo, 3);
        for (slot, p) in procs.iter().enumerate() {
            queue.push(slot, p);
        }
        assert_eq!(queue.slots(), vec![0, 1, 2]);
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.peek(), Some(1));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_keyed_order_with_tie_break() {
        let mut procs = table(&[(1, 4, 0), (2, 2, 0), (3, 2, 0)]);
        procs[1].enter_ready(6);
        procs[2].enter_ready(3);
        procs[0].enter_ready(1);

        let mut queue = ReadyQueue::new(QueueOrder::BurstTime, 3);
        for (slot, p) in procs.iter().enumerate() {
            queue.push(slot, p);
        }

        // equal burst: earlier ready queue time wins
        assert_eq!(queue.slots(), vec![2, 1, 0]);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_insertion_breaks_full_ties() {
        let procs = table(&[(1, 3, 0), (2, 3, 0)]);
        let mut queue = ReadyQueue::new(QueueOrder::BurstTime, 2);
        queue.push(1, &procs[1]);
        queue.push(0, &procs[0]);
        assert_eq!(queue.pop(), Some(1));
    }

    #[test]
    fn test_rekey_after_mutation() {
        let mut procs = table(&[(1, 1, 3), (2, 1, 4)]);
        let mut queue = ReadyQueue::new(QueueOrder::Priority, 2);
        queue.push(0, &procs[0]);
        queue.push(1, &procs[1]);
        assert_eq!(queue.peek(), Some(0));

        procs[1].decrement_priority();
        procs[1].decrement_priority();
        queue.rekey(&procs);
        assert_eq!(queue.peek(), Some(1));
    }
}
