//! A per-person, time-ordered log of co-presence with other persons.
//!
//! Entries are appended by the contact model while it replays the day's events, read by the
//! progression engine when a contagious person is detected, and pruned once per day.

use std::collections::VecDeque;

use crate::people::PersonId;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TraceEntry {
    /// Seconds since the start of the simulation.
    pub time: f64,
    pub contact: PersonId,
}

#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    entries: VecDeque<TraceEntry>,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        TraceLog::default()
    }

    /// Records a co-presence with `contact` at `time`. Entries stay ordered by time; an entry
    /// with the same time as existing ones goes after them.
    pub fn record(&mut self, time: f64, contact: PersonId) {
        let entry = TraceEntry { time, contact };
        match self.entries.back() {
            Some(last) if last.time > time => {
                let position = self.entries.partition_point(|e| e.time <= time);
                self.entries.insert(position, entry);
            }
            _ => self.entries.push_back(entry),
        }
    }

    /// All contacts recorded at or after `since`, in time order. A contact seen several times
    /// is returned several times.
    pub fn contacts_since(&self, since: f64) -> impl Iterator<Item = PersonId> + '_ {
        let start = self.entries.partition_point(|e| e.time < since);
        self.entries.range(start..).map(|e| e.contact)
    }

    /// Drops every entry strictly older than `before`.
    pub fn prune_before(&mut self, before: f64) {
        let keep_from = self.entries.partition_point(|e| e.time < before);
        self.entries.drain(..keep_from);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }
}
