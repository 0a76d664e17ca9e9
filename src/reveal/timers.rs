//! Cancellable scheduled-task arena.
//!
//! Tasks are plain payloads keyed by their due time. Cancelling everything bumps the arena
//! generation, so handles issued before the bump can never be observed as live again.

use crate::foundation::core::Millis;
use std::collections::BTreeMap;

/// Handle to a task scheduled in a [`TimerArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    generation: u64,
    seq: u64,
    due: Millis,
}

impl TaskHandle {
    /// Generation the task was scheduled in.
    pub fn generation(self) -> u64 {
        self.generation
    }

    /// Absolute due time.
    pub fn due(self) -> Millis {
        self.due
    }
}

/// Pending tasks ordered by `(due, scheduling order)`.
#[derive(Debug)]
pub struct TimerArena<T> {
    generation: u64,
    next_seq: u64,
    pending: BTreeMap<(Millis, u64), T>,
}

impl<T> Default for TimerArena<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation. Incremented by every [`TimerArena::cancel_all`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `payload` to become due at `due`.
    pub fn schedule(&mut self, due: Millis, payload: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((due, seq), payload);
        TaskHandle {
            generation: self.generation,
            seq,
            due,
        }
    }

    /// Cancel a single task. Returns `false` when it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if handle.generation != self.generation {
            return false;
        }
        self.pending.remove(&(handle.due, handle.seq)).is_some()
    }

    /// Cancel every pending task and start a new generation. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.generation += 1;
        dropped
    }

    /// Return `true` while the task behind `handle` is still pending.
    pub fn is_live(&self, handle: TaskHandle) -> bool {
        handle.generation == self.generation
            && self.pending.contains_key(&(handle.due, handle.seq))
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, T)> {
        let (&(due, seq), _) = self.pending.first_key_value()?;
        if due > now {
            return None;
        }
        self.pending.remove(&(due, seq)).map(|t| (due, t))
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.first_key_value().map(|(&(due, _), _)| due)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/timers.rs"]
mod tests;
