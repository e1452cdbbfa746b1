//! Builder API for constructing machines with handlers in place.
//!
//! Constructing a [`StateStack`] directly fires the initial state's
//! `begin` hook before any handler can be registered, so that first
//! hook goes unobserved. The builder collects registrations first and
//! pushes the initial state at `build` time, making the initial `begin`
//! observable.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{
    Lifecycle, Symbol, TransitionLog, TransitionTable, Trigger, TriggerId, DEFAULT_LOG_CAPACITY,
};
use crate::machine::{StateMachine, StateStack};
use std::sync::Arc;

/// Fluent builder for [`StateStack`] and [`StateMachine`].
///
/// # Example
///
/// ```rust
/// use strata::{symbol_enum, StackBuilder};
///
/// symbol_enum! {
///     enum Sym {
///         Idle,
///         Busy,
///         Work,
///     }
/// }
///
/// let mut fsm = StackBuilder::<Sym, Vec<String>>::new()
///     .initial(Sym::Idle)
///     .on_enter(Sym::Idle, |fsm, _| {
///         fsm.context_mut().push("enter idle".to_string());
///     })
///     .on(Sym::Idle, Sym::Work, |fsm, _| fsm.replace(Sym::Busy))
///     .build(Vec::new())
///     .unwrap();
///
/// // the initial begin hook was observable
/// assert_eq!(fsm.context().as_slice(), ["enter idle"]);
/// assert!(fsm.dispatch(Sym::Work));
/// assert!(fsm.is(&Sym::Busy));
/// ```
pub struct StackBuilder<S: Symbol, C> {
    initial: Option<S>,
    table: TransitionTable<S, C>,
    log_capacity: usize,
}

impl<S: Symbol, C> StackBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            table: TransitionTable::new(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Bind `handler` to the (state, trigger) pair.
    pub fn on<F>(mut self, state: S, trigger: S, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.table
            .insert(state, TriggerId::Event(trigger), Arc::new(handler));
        self
    }

    /// Bind a handler to the state's `begin` hook.
    pub fn on_enter<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Begin, handler)
    }

    /// Bind a handler to the state's `end` hook.
    pub fn on_exit<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::End, handler)
    }

    /// Bind a handler to the state's `pause` hook.
    pub fn on_suspend<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Pause, handler)
    }

    /// Bind a handler to the state's `resume` hook.
    pub fn on_resume<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Resume, handler)
    }

    fn on_hook<F>(mut self, state: S, hook: Lifecycle, handler: F) -> Self
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.table
            .insert(state, TriggerId::Hook(hook), Arc::new(handler));
        self
    }

    /// Override the transition log's retention bound.
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Build the hierarchical machine, pushing the initial state and
    /// firing its `begin` hook.
    pub fn build(self, context: C) -> Result<StateStack<S, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if self.log_capacity == 0 {
            return Err(BuildError::ZeroLogCapacity);
        }
        Ok(StateStack::from_parts(
            initial,
            context,
            self.table,
            TransitionLog::with_capacity(self.log_capacity),
        ))
    }

    /// Build the single-level variant over the same registrations.
    pub fn build_flat(self, context: C) -> Result<StateMachine<S, C>, BuildError> {
        Ok(StateMachine::from_stack(self.build(context)?))
    }
}

impl<S: Symbol, C> Default for StackBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
