//! Hierarchical machine: a stack of nested active states.

use crate::core::{
    Lifecycle, Symbol, TransitionLog, TransitionRecord, TransitionTable, Trigger, TriggerId,
};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, trace};

type UnhandledHook<S> = Arc<dyn Fn(&S, &Trigger<S>) + Send + Sync>;
type RecordObserver<S> = Arc<dyn Fn(&TransitionRecord<S>) + Send + Sync>;

/// A hierarchical state machine.
///
/// The machine holds an ordered path of active states, index 0 being the
/// root and the last element the innermost active substate. One
/// [`TransitionTable`] and one [`TransitionLog`] serve the whole
/// hierarchy, and the machine owns a host context value `C` that
/// handlers reach through [`context_mut`](Self::context_mut).
///
/// Pushing suspends the current innermost state (its `pause` hook fires)
/// and enters the new one; popping ends the innermost state and resumes
/// the newly exposed one; [`replace`](Self::replace) is the ordinary
/// same-level transition. Feeding a trigger through
/// [`dispatch`](Self::dispatch) offers it to the innermost state first
/// and bubbles it up toward the root.
///
/// Dropping the machine pops every remaining level, so `end` hooks fire
/// innermost first even when the host unwinds early.
///
/// # Example
///
/// ```rust
/// use strata::{symbol_enum, StateStack};
///
/// symbol_enum! {
///     enum Sym {
///         Walking,
///         Defending,
///         Tick,
///     }
/// }
///
/// let mut ant = StateStack::new(Sym::Walking, 2i32);
/// ant.on(Sym::Defending, Sym::Tick, |ant, _| {
///     *ant.context_mut() -= 1;
///     if *ant.context() < 0 {
///         ant.pop();
///     }
/// });
///
/// ant.push(Sym::Defending);
/// while ant.is(&Sym::Defending) {
///     ant.dispatch(Sym::Tick);
/// }
/// assert!(ant.is(&Sym::Walking));
/// ```
pub struct StateStack<S: Symbol, C> {
    stack: Vec<S>,
    table: TransitionTable<S, C>,
    log: TransitionLog<S>,
    current: Option<Trigger<S>>,
    context: C,
    on_unhandled: Option<UnhandledHook<S>>,
    observer: Option<RecordObserver<S>>,
}

impl<S: Symbol, C> StateStack<S, C> {
    /// Create a machine with `initial` as its root state.
    ///
    /// The initial state is pushed immediately, firing its `begin` hook.
    /// To observe that first hook, register handlers up front through
    /// [`StackBuilder`](crate::StackBuilder) instead.
    pub fn new(initial: S, context: C) -> Self {
        Self::from_parts(initial, context, TransitionTable::new(), TransitionLog::new())
    }

    pub(crate) fn from_parts(
        initial: S,
        context: C,
        table: TransitionTable<S, C>,
        log: TransitionLog<S>,
    ) -> Self {
        let mut machine = Self {
            stack: Vec::new(),
            table,
            log,
            current: None,
            context,
            on_unhandled: None,
            observer: None,
        };
        machine.push(initial);
        machine
    }

    // ---- registration ----------------------------------------------------

    /// Bind `handler` to the (state, trigger) pair, silently replacing
    /// any previous binding. Registration never fails.
    pub fn on<F>(&mut self, state: S, trigger: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.table
            .insert(state, TriggerId::Event(trigger), Arc::new(handler));
    }

    /// Bind a handler to the state's `begin` hook.
    pub fn on_enter<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Begin, handler);
    }

    /// Bind a handler to the state's `end` hook.
    pub fn on_exit<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::End, handler);
    }

    /// Bind a handler to the state's `pause` hook.
    pub fn on_suspend<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Pause, handler);
    }

    /// Bind a handler to the state's `resume` hook.
    pub fn on_resume<F>(&mut self, state: S, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_hook(state, Lifecycle::Resume, handler);
    }

    fn on_hook<F>(&mut self, state: S, hook: Lifecycle, handler: F)
    where
        F: Fn(&mut StateStack<S, C>, &Trigger<S>) + Send + Sync + 'static,
    {
        self.table
            .insert(state, TriggerId::Hook(hook), Arc::new(handler));
    }

    /// Diagnostic hook fired when a live stack declines a dispatched
    /// trigger at every level. Receives the innermost state and the
    /// declined invocation. Optional; not consulted by dispatch logic.
    pub fn set_on_unhandled<F>(&mut self, hook: F)
    where
        F: Fn(&S, &Trigger<S>) + Send + Sync + 'static,
    {
        self.on_unhandled = Some(Arc::new(hook));
    }

    /// Diagnostic hook fired with every appended transition record.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: Fn(&TransitionRecord<S>) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
    }

    // ---- hierarchy manipulation ------------------------------------------

    /// Suspend the current innermost state and nest `state` above it.
    ///
    /// Fires `pause` on the current innermost state, appends `state`,
    /// then fires its `begin` hook. Pushing the state that is already
    /// innermost is a no-op: depth is unchanged and no hook fires.
    pub fn push(&mut self, state: S) {
        if self.stack.last() == Some(&state) {
            return;
        }
        trace!(state = state.name(), depth = self.stack.len(), "push");
        if let Some(top) = self.stack.last().cloned() {
            self.invoke(&top, &Trigger::hook(Lifecycle::Pause));
        }
        self.stack.push(state.clone());
        self.invoke(&state, &Trigger::hook(Lifecycle::Begin));
    }

    /// End the innermost state and resume its parent.
    ///
    /// Fires `end` on the innermost state, removes it, then fires
    /// `resume` on the newly exposed state if one remains. Popping an
    /// empty stack is a no-op. If the `end` handler re-entrantly
    /// disturbed the innermost slot, the removal (and the `resume`) is
    /// skipped; the handler's own mutations win.
    pub fn pop(&mut self) {
        let Some(top) = self.stack.last().cloned() else {
            return;
        };
        let index = self.stack.len() - 1;
        trace!(state = top.name(), depth = index, "pop");
        self.invoke(&top, &Trigger::hook(Lifecycle::End));
        if self.stack.get(index) == Some(&top) {
            self.stack.remove(index);
            if let Some(next) = self.stack.last().cloned() {
                self.invoke(&next, &Trigger::hook(Lifecycle::Resume));
            }
        }
    }

    /// Same-level transition to a sibling state.
    ///
    /// Fires `end` on the innermost state, overwrites its slot with
    /// `state`, then fires `begin` on the new occupant. Replacing a
    /// state with itself refreshes it: `end` then `begin` both fire,
    /// unlike [`push`](Self::push)'s self-no-op. On an empty stack this
    /// behaves as a push.
    pub fn replace(&mut self, state: S) {
        if self.stack.is_empty() {
            self.push(state);
            return;
        }
        let index = self.stack.len() - 1;
        let top = self.stack[index].clone();
        trace!(from = top.name(), to = state.name(), "replace");
        self.invoke(&top, &Trigger::hook(Lifecycle::End));
        if self.stack.get(index) == Some(&top) {
            self.stack[index] = state.clone();
            self.invoke(&state, &Trigger::hook(Lifecycle::Begin));
        }
    }

    // ---- dispatch --------------------------------------------------------

    /// Offer a trigger to the hierarchy, innermost state first.
    ///
    /// The walk moves from the innermost state toward the root doing
    /// table lookups only, so no host code runs while levels decline.
    /// The first level with a binding for the trigger accepts it:
    ///
    /// 1. the invocation becomes the machine's current trigger;
    /// 2. every inner level that declined is cancelled, innermost first.
    ///    Cancellation fires the level's `end` hook and removes it
    ///    without a `resume`: the hierarchy collapses to the accepting
    ///    ancestor;
    /// 3. the accepting handler runs, now at the top of the stack, so
    ///    its own `replace`/`push` calls act on its own level.
    ///
    /// Returns whether any level accepted. On total failure the stack
    /// and the current trigger are left untouched, and dispatch on an
    /// empty stack fails immediately.
    ///
    /// A declined trigger is an expected outcome, not an error; absence
    /// of a binding is judged per (state, trigger) pair.
    pub fn dispatch(&mut self, trigger: impl Into<Trigger<S>>) -> bool {
        let trigger = trigger.into();
        if self.stack.is_empty() {
            trace!(trigger = trigger.name(), "dispatch on empty stack");
            return false;
        }
        let mut level = self.stack.len();
        while level > 0 {
            level -= 1;
            let state = self.stack[level].clone();
            if !self.table.contains(&state, trigger.id()) {
                continue;
            }
            debug!(
                state = state.name(),
                trigger = trigger.name(),
                level,
                "trigger accepted"
            );
            self.current = Some(trigger.clone());
            self.cancel_above(level);
            self.invoke(&state, &trigger);
            return true;
        }
        debug!(trigger = trigger.name(), "trigger unhandled");
        if let (Some(hook), Some(top)) = (self.on_unhandled.clone(), self.stack.last()) {
            hook(top, &trigger);
        }
        false
    }

    /// Forcibly terminate every level above `level`, innermost first.
    /// Each cancelled level gets its `end` hook but no `resume`.
    fn cancel_above(&mut self, level: usize) {
        let cancelled: Vec<S> = self.stack[level + 1..].to_vec();
        for (offset, state) in cancelled.iter().enumerate().rev() {
            let index = level + 1 + offset;
            trace!(state = state.name(), "cancelling declined level");
            self.invoke(state, &Trigger::hook(Lifecycle::End));
            if self.stack.get(index) == Some(state) {
                self.stack.remove(index);
            }
        }
    }

    /// Look up the pair, run the bound handler, and append a history
    /// record. Returns false with no side effect when the pair has no
    /// binding.
    ///
    /// The handler is cloned out of the table before the call, and the
    /// innermost state is re-read once it returns; re-entrant mutation
    /// of the table or the stack cannot invalidate an in-flight
    /// invocation.
    fn invoke(&mut self, state: &S, trigger: &Trigger<S>) -> bool {
        let Some(handler) = self.table.handler(state, trigger.id()).cloned() else {
            return false;
        };
        let from = self.innermost_or(state);
        handler(self, trigger);
        let to = self.innermost_or(state);
        let record = TransitionRecord::new(from, trigger.id().clone(), to);
        if let Some(observer) = self.observer.clone() {
            observer(&record);
        }
        self.log.record(record);
        true
    }

    fn innermost_or(&self, fallback: &S) -> S {
        self.stack.last().cloned().unwrap_or_else(|| fallback.clone())
    }

    // ---- introspection ---------------------------------------------------

    /// The innermost active state. `None` only once the host has popped
    /// every level; the machine is then inert.
    pub fn current_state(&self) -> Option<&S> {
        self.stack.last()
    }

    /// The most recent invocation accepted by [`dispatch`](Self::dispatch).
    /// Lifecycle hooks do not overwrite it.
    pub fn current_trigger(&self) -> Option<&Trigger<S>> {
        self.current.as_ref()
    }

    /// The full active path, root first.
    pub fn path(&self) -> &[S] {
        &self.stack
    }

    /// Number of active levels.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether `state` is the innermost active state.
    pub fn is(&self, state: &S) -> bool {
        self.stack.last() == Some(state)
    }

    /// Whether `state` is anywhere on the active path.
    pub fn contains(&self, state: &S) -> bool {
        self.stack.contains(state)
    }

    /// Whether the most recently accepted trigger was `trigger`.
    pub fn did(&self, trigger: &S) -> bool {
        matches!(
            self.current.as_ref().map(Trigger::id),
            Some(TriggerId::Event(current)) if current == trigger
        )
    }

    /// The bounded transition history.
    pub fn history(&self) -> &TransitionLog<S> {
        &self.log
    }

    /// The shared handler table.
    pub fn table(&self) -> &TransitionTable<S, C> {
        &self.table
    }

    /// Mutable access to the handler table, e.g. for
    /// [`slot`](TransitionTable::slot)-style registration.
    pub fn table_mut(&mut self) -> &mut TransitionTable<S, C> {
        &mut self.table
    }

    /// The host context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the host context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Human-readable snapshot of the active path and the retained log.
    pub fn debug_dump(&self) -> String {
        let path: Vec<&str> = self.stack.iter().map(Symbol::name).collect();
        let mut out = String::new();
        let _ = writeln!(out, "active path: {}", path.join(" / "));
        let _ = writeln!(
            out,
            "log ({} of {}):",
            self.log.len(),
            self.log.capacity()
        );
        for record in self.log.iter() {
            let _ = writeln!(out, "  {record}");
        }
        out
    }
}

/// Teardown pops every remaining level, firing `end` innermost first
/// (and `resume` on each briefly re-exposed parent, as any pop does).
impl<S: Symbol, C> Drop for StateStack<S, C> {
    fn drop(&mut self) {
        while !self.stack.is_empty() {
            self.pop();
        }
    }
}
