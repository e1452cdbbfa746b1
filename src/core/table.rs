//! Transition table: (state, trigger) pairs mapped to handlers.

use super::symbol::Symbol;
use super::trigger::{Trigger, TriggerId};
use crate::machine::StateStack;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback bound to one (state, trigger) pair.
///
/// Handlers receive the owning machine and the full invocation, and may
/// re-enter the machine (push, pop, replace, dispatch) before returning.
pub type Handler<S, C> = Arc<dyn Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync>;

fn noop<S: Symbol, C>() -> Handler<S, C> {
    Arc::new(|_machine, _trigger| {})
}

/// Mapping from (state, trigger) pairs to registered handlers.
///
/// One table serves a whole hierarchy: handlers for every level share a
/// single namespace keyed per pair. Registration never fails; inserting
/// an existing key silently replaces the previous handler. Absence is
/// per pair, so a state may handle one trigger and decline another.
pub struct TransitionTable<S: Symbol, C> {
    entries: HashMap<S, HashMap<TriggerId<S>, Handler<S, C>>>,
}

impl<S: Symbol, C> Default for TransitionTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, C> TransitionTable<S, C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Mutable slot for the given pair, created bound to a no-op if the
    /// pair was not yet registered. Assigning to the slot is how a
    /// handler is (re)bound; the operation always succeeds.
    pub fn slot(&mut self, state: S, trigger: TriggerId<S>) -> &mut Handler<S, C> {
        self.entries
            .entry(state)
            .or_default()
            .entry(trigger)
            .or_insert_with(noop)
    }

    /// Bind `handler` to the pair, replacing any previous binding.
    pub fn insert(&mut self, state: S, trigger: TriggerId<S>, handler: Handler<S, C>) {
        self.entries.entry(state).or_default().insert(trigger, handler);
    }

    /// The handler bound to the pair, if any.
    pub fn handler(&self, state: &S, trigger: &TriggerId<S>) -> Option<&Handler<S, C>> {
        self.entries.get(state)?.get(trigger)
    }

    /// Whether the pair has a binding (a no-op slot counts).
    pub fn contains(&self, state: &S, trigger: &TriggerId<S>) -> bool {
        self.handler(state, trigger).is_some()
    }

    /// Total number of registered pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether no pair is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Lifecycle;

    crate::symbol_enum! {
        enum TestSym {
            Idle,
            Busy,
            Work,
            Rest,
        }
    }

    fn event(sym: TestSym) -> TriggerId<TestSym> {
        TriggerId::Event(sym)
    }

    #[test]
    fn slot_creates_noop_binding() {
        let mut table: TransitionTable<TestSym, u32> = TransitionTable::new();

        assert!(!table.contains(&TestSym::Idle, &event(TestSym::Work)));
        table.slot(TestSym::Idle, event(TestSym::Work));
        assert!(table.contains(&TestSym::Idle, &event(TestSym::Work)));

        // the created binding really is callable and does nothing
        let handler = table
            .handler(&TestSym::Idle, &event(TestSym::Work))
            .cloned()
            .unwrap();
        let mut machine = StateStack::new(TestSym::Idle, 0u32);
        handler(&mut machine, &Trigger::new(TestSym::Work));
        assert_eq!(*machine.context(), 0);
    }

    #[test]
    fn insert_replaces_previous_handler() {
        let mut table: TransitionTable<TestSym, Vec<&'static str>> = TransitionTable::new();

        table.insert(
            TestSym::Idle,
            event(TestSym::Work),
            Arc::new(|machine, _| machine.context_mut().push("first")),
        );
        table.insert(
            TestSym::Idle,
            event(TestSym::Work),
            Arc::new(|machine, _| machine.context_mut().push("second")),
        );

        assert_eq!(table.len(), 1);

        let handler = table
            .handler(&TestSym::Idle, &event(TestSym::Work))
            .cloned()
            .unwrap();
        let mut machine = StateStack::new(TestSym::Idle, Vec::new());
        handler(&mut machine, &Trigger::new(TestSym::Work));
        assert_eq!(machine.context().as_slice(), ["second"]);
    }

    #[test]
    fn absence_is_per_pair_not_per_state() {
        let mut table: TransitionTable<TestSym, ()> = TransitionTable::new();
        table.insert(TestSym::Idle, event(TestSym::Work), Arc::new(|_, _| {}));

        assert!(table.contains(&TestSym::Idle, &event(TestSym::Work)));
        assert!(!table.contains(&TestSym::Idle, &event(TestSym::Rest)));
        assert!(!table.contains(&TestSym::Busy, &event(TestSym::Work)));
    }

    #[test]
    fn hooks_and_events_occupy_distinct_keys() {
        let mut table: TransitionTable<TestSym, ()> = TransitionTable::new();
        table.insert(
            TestSym::Idle,
            TriggerId::Hook(Lifecycle::Begin),
            Arc::new(|_, _| {}),
        );

        assert!(table.contains(&TestSym::Idle, &TriggerId::Hook(Lifecycle::Begin)));
        assert!(!table.contains(&TestSym::Idle, &TriggerId::Hook(Lifecycle::End)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn len_counts_pairs_across_states() {
        let mut table: TransitionTable<TestSym, ()> = TransitionTable::new();
        assert!(table.is_empty());

        table.insert(TestSym::Idle, event(TestSym::Work), Arc::new(|_, _| {}));
        table.insert(TestSym::Idle, event(TestSym::Rest), Arc::new(|_, _| {}));
        table.insert(TestSym::Busy, event(TestSym::Rest), Arc::new(|_, _| {}));

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }
}
