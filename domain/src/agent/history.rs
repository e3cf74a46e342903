//! Bounded task history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::delegation::DelegationContext;
use crate::util::truncate_chars;

/// Number of entries an agent keeps unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Longest result summary stored per entry, in characters.
pub const RESULT_SUMMARY_LIMIT: usize = 500;

/// Record of one completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    pub task: String,
    pub context: Option<DelegationContext>,
    pub result_summary: String,
    pub timestamp: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Build an entry stamped now; `result` is cut to [`RESULT_SUMMARY_LIMIT`].
    pub fn new(task: impl Into<String>, context: Option<DelegationContext>, result: &str) -> Self {
        Self {
            task: task.into(),
            context,
            result_summary: truncate_chars(result, RESULT_SUMMARY_LIMIT).to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// FIFO ring of [`TaskHistoryEntry`]; the oldest entry is evicted on overflow.
#[derive(Debug, Clone)]
pub struct TaskHistory {
    entries: VecDeque<TaskHistoryEntry>,
    capacity: usize,
}

impl Default for TaskHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl TaskHistory {
    /// A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: TaskHistoryEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The most recent `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<TaskHistoryEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_is_truncated() {
        let long = "x".repeat(RESULT_SUMMARY_LIMIT + 50);
        let entry = TaskHistoryEntry::new("task", None, &long);
        assert_eq!(entry.result_summary.chars().count(), RESULT_SUMMARY_LIMIT);
    }

    #[test]
    fn test_ring_evicts_oldest_first() {
        let mut history = TaskHistory::default();
        for i in 0..(DEFAULT_HISTORY_CAPACITY + 25) {
            history.push(TaskHistoryEntry::new(format!("task {}", i), None, "ok"));
        }

        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        let all = history.recent(usize::MAX);
        assert_eq!(all.first().unwrap().task, "task 25");
        assert_eq!(all.last().unwrap().task, format!("task {}", DEFAULT_HISTORY_CAPACITY + 24));
    }

    #[test]
    fn test_recent_returns_newest_last() {
        let mut history = TaskHistory::with_capacity(10);
        for task in ["a", "b", "c", "d"] {
            history.push(TaskHistoryEntry::new(task, None, ""));
        }

        let tasks: Vec<_> = history.recent(2).into_iter().map(|e| e.task).collect();
        assert_eq!(tasks, vec!["c", "d"]);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = TaskHistory::with_capacity(0);
        history.push(TaskHistoryEntry::new("a", None, ""));
        history.push(TaskHistoryEntry::new("b", None, ""));
        assert_eq!(history.len(), 1);
        assert_eq!(history.recent(1)[0].task, "b");
    }
}
