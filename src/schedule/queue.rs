use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::foundation::core::Millis;

/// Counter identifying one reconstruction pass.
///
/// Deferred work carries the generation it was scheduled under; anything older than the
/// controller's current generation is stale and must not run.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Work item popped from a [`TaskQueue`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled<T> {
    pub due: Millis,
    pub generation: Generation,
    pub task: T,
}

struct Entry<T> {
    due: Millis,
    seq: u64,
    generation: Generation,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap yields the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// Deterministic timer queue for deferred, generation-tagged work.
///
/// Ordering rule: earliest `due` first; ties resolve in scheduling order.
pub struct TaskQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> std::fmt::Debug for TaskQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.heap.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, generation: Generation, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry {
            due,
            seq,
            generation,
            task,
        });
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.heap.peek().map(|e| e.due)
    }

    /// Pop the earliest item whose due time is `<= now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Scheduled<T>> {
        if self.heap.peek()?.due > now {
            return None;
        }
        let e = self.heap.pop()?;
        Some(Scheduled {
            due: e.due,
            generation: e.generation,
            task: e.task,
        })
    }

    /// Drop every item not tagged with `current`; returns how many were removed.
    pub fn retain_generation(&mut self, current: Generation) -> usize {
        let before = self.heap.len();
        self.heap.retain(|e| e.generation == current);
        before - self.heap.len()
    }

    /// Count pending items matching `pred`.
    pub fn count_where(&self, mut pred: impl FnMut(Generation, &T) -> bool) -> usize {
        self.heap
            .iter()
            .filter(|e| pred(e.generation, &e.task))
            .count()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/queue.rs"]
mod tests;
