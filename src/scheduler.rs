//! Virtual timer queue.
//!
//! Stands in for `setTimeout`: tasks are queued against a millisecond clock
//! that only moves when the host advances it. Every scheduled task gets a
//! [`TimerId`] so it can be cancelled before it fires.

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_seq: u64,
    // (deadline, seq) keeps equal deadlines in scheduling order
    queue: BTreeMap<(u64, u64), T>,
    deadlines: HashMap<u64, u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay_ms);
        self.queue.insert((due, seq), task);
        self.deadlines.insert(seq, due);
        TimerId(seq)
    }

    /// Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.deadlines.remove(&id.0)?;
        self.queue.remove(&(due, id.0))
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        n
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Remove the earliest task due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let key = *self.queue.keys().next()?;
        if key.0 > until {
            return None;
        }
        let task = self.queue.remove(&key)?;
        self.deadlines.remove(&key.1);
        self.now = self.now.max(key.0);
        Some((TimerId(key.1), task))
    }

    /// Move the clock forward without running anything. Never moves it back.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}
