//! Flat machine: the single-level degenerate case.

use super::stack::StateStack;
use crate::core::{Symbol, TransitionLog, TransitionRecord, TransitionTable, Trigger};

/// A single-level state machine.
///
/// Wraps a [`StateStack`] that is kept exactly one level deep: the only
/// transition primitive on its surface is [`replace`](Self::replace),
/// and dispatch reduces to a single lookup at the sole level. Table and
/// log machinery are shared with the hierarchical machine. A guard is
/// simply the handler's own predicate, transitioning back to the same
/// state (or not at all) when it fails.
///
/// Handlers receive the underlying [`StateStack`]; in a flat machine
/// they are expected to call `replace` only.
///
/// # Example
///
/// ```rust
/// use strata::{symbol_enum, StateMachine};
///
/// symbol_enum! {
///     enum Cd {
///         Closed,
///         Opened,
///         Open,
///         Close,
///     }
/// }
///
/// let mut player = StateMachine::new(Cd::Closed, ());
/// player.on(Cd::Closed, Cd::Open, |fsm, _| fsm.replace(Cd::Opened));
/// player.on(Cd::Opened, Cd::Close, |fsm, _| fsm.replace(Cd::Closed));
///
/// assert!(player.dispatch(Cd::Open));
/// assert_eq!(player.current_state(), Some(&Cd::Opened));
/// assert!(!player.dispatch(Cd::Open));
/// ```
pub struct StateMachine<S: Symbol, C> {
    inner: StateStack<S, C>,
}

impl<S: Symbol, C> StateMachine<S, C> {
    /// Create a machine in `initial`, firing its `begin` hook.
    pub fn new(initial: S, context: C) -> Self {
        Self {
            inner: StateStack::new(initial, context),
        }
    }

    pub(crate) fn from_stack(inner: StateStack<S, C>) -> Self {
        Self { inner }
    }

    /// Bind `handler` to the (state, trigger) pair; always succeeds.
    pub fn on<F>(&mut self, state: S, trigger: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.inner.on(state, trigger, handler);
    }

    /// Bind a handler to the state's `begin` hook.
    pub fn on_enter<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.inner.on_enter(state, handler);
    }

    /// Bind a handler to the state's `end` hook.
    pub fn on_exit<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.inner.on_exit(state, handler);
    }

    /// Diagnostic hook for declined triggers; see
    /// [`StateStack::set_on_unhandled`].
    pub fn set_on_unhandled<F>(&mut self, hook: F)
    where
        F: Fn(&S, &Trigger<S>) + Send + Sync + 'static,
    {
        self.inner.set_on_unhandled(hook);
    }

    /// Diagnostic hook for appended records; see
    /// [`StateStack::set_observer`].
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: Fn(&TransitionRecord<S>) + Send + Sync + 'static,
    {
        self.inner.set_observer(observer);
    }

    /// Offer a trigger to the current state; a single lookup, no
    /// delegation walk.
    pub fn dispatch(&mut self, trigger: impl Into<Trigger<S>>) -> bool {
        self.inner.dispatch(trigger)
    }

    /// Transition to a sibling state: `end`, overwrite, `begin`.
    /// Replacing the current state with itself refreshes it.
    pub fn replace(&mut self, state: S) {
        self.inner.replace(state);
    }

    /// The current state.
    pub fn current_state(&self) -> Option<&S> {
        self.inner.current_state()
    }

    /// The most recently accepted invocation.
    pub fn current_trigger(&self) -> Option<&Trigger<S>> {
        self.inner.current_trigger()
    }

    /// Whether `state` is the current state.
    pub fn is(&self, state: &S) -> bool {
        self.inner.is(state)
    }

    /// Whether the most recently accepted trigger was `trigger`.
    pub fn did(&self, trigger: &S) -> bool {
        self.inner.did(trigger)
    }

    /// The bounded transition history.
    pub fn history(&self) -> &TransitionLog<S> {
        self.inner.history()
    }

    /// The shared handler table.
    pub fn table(&self) -> &TransitionTable<S, C> {
        self.inner.table()
    }

    /// The host context.
    pub fn context(&self) -> &C {
        self.inner.context()
    }

    /// Mutable access to the host context.
    pub fn context_mut(&mut self) -> &mut C {
        self.inner.context_mut()
    }

    /// Human-readable snapshot of the state and the retained log.
    pub fn debug_dump(&self) -> String {
        self.inner.debug_dump()
    }
}
