//! Bounded transition history.
//!
//! Every handled invocation appends one record to a fixed-capacity ring
//! buffer; the oldest record is evicted once the bound is reached. The
//! log exists for debugging and introspection and is never consulted by
//! dispatch itself.

use super::symbol::Symbol;
use super::trigger::TriggerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of retained records, matching the traditional bound.
pub const DEFAULT_LOG_CAPACITY: usize = 60;

/// Record of a single realized transition.
///
/// `from` is the innermost active state when the handler was invoked and
/// `to` the innermost state after it returned; for a plain same-level
/// transition these form the familiar (source, trigger, target) triple.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: Symbol> {
    /// Innermost active state before the handler ran.
    pub from: S,
    /// The trigger that caused the record.
    pub trigger: TriggerId<S>,
    /// Innermost active state after the handler returned.
    pub to: S,
    /// When the transition was recorded.
    pub timestamp: DateTime<Utc>,
}

impl<S: Symbol> TransitionRecord<S> {
    /// Create a record stamped with the current time.
    pub fn new(from: S, trigger: TriggerId<S>, to: S) -> Self {
        Self {
            from,
            trigger,
            to,
            timestamp: Utc::now(),
        }
    }
}

impl<S: Symbol> fmt::Display for TransitionRecord<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] --{}--> [{}]",
            self.from.name(),
            self.trigger.name(),
            self.to.name()
        )
    }
}

/// Fixed-capacity ring buffer of [`TransitionRecord`]s, oldest first.
///
/// Reads use extended indexing: any index is taken modulo the current
/// length, so `-1` is the most recent record, `-2` the one before it,
/// and out-of-range positive indices wrap instead of failing. Reading
/// from an empty log yields `None`.
///
/// # Example
///
/// ```rust
/// use strata::{TransitionLog, TransitionRecord, TriggerId};
///
/// let mut log: TransitionLog<String> = TransitionLog::with_capacity(2);
/// for step in ["a", "b", "c"] {
///     log.record(TransitionRecord::new(
///         step.to_string(),
///         TriggerId::Event("next".to_string()),
///         step.to_string(),
///     ));
/// }
///
/// // capacity 2: "a" was evicted
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.get(0).unwrap().from, "b");
/// assert_eq!(log.get(-1).unwrap().from, "c");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<S: Symbol> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

impl<S: Symbol> Default for TransitionLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> TransitionLog<S> {
    /// Create an empty log with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create an empty log retaining at most `capacity` records.
    ///
    /// A capacity of zero is clamped to one; the log always retains at
    /// least the most recent record.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest if the log is full.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// The record at `index`, under extended indexing.
    ///
    /// Index 0 is the oldest retained record and `-1` the newest; any
    /// other value wraps modulo the current length. Returns `None` only
    /// when the log is empty.
    pub fn get(&self, index: i64) -> Option<&TransitionRecord<S>> {
        if self.records.is_empty() {
            return None;
        }
        let len = self.records.len() as i64;
        self.records.get(index.rem_euclid(len) as usize)
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The retention bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }
}
