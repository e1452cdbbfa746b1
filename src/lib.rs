//! Strata: a hierarchical finite-state-machine runtime.
//!
//! Strata lets a host declare symbolic states and triggers, attach
//! handlers to (state, trigger) pairs, and drive transitions by feeding
//! triggers into a stack of nested active states. A trigger is offered
//! to the innermost state first and bubbles up toward the root; inner
//! levels that declined are cancelled once an ancestor accepts, so the
//! hierarchy snaps back to the level that actually handled the event.
//!
//! # Core Concepts
//!
//! - **Symbol**: one identifier domain for states and triggers, via the
//!   [`Symbol`] trait and the [`symbol_enum!`] macro
//! - **Lifecycle hooks**: `begin`/`end`/`pause`/`resume`, fired
//!   automatically by push, pop and replace
//! - **Bubble-up dispatch**: innermost-first trigger routing with
//!   collapse-on-acceptance
//! - **History**: a bounded ring buffer of realized transitions with
//!   extended (wraparound) indexing
//!
//! # Example
//!
//! ```rust
//! use strata::{symbol_enum, StateStack};
//!
//! symbol_enum! {
//!     enum Sym {
//!         Walking,
//!         Defending,
//!         Tick,
//!     }
//! }
//!
//! // an ant walks until threatened, then defends for a few ticks
//! let mut ant = StateStack::new(Sym::Walking, 3i32);
//! ant.on(Sym::Defending, Sym::Tick, |ant, _| {
//!     *ant.context_mut() -= 1;
//!     if *ant.context() < 0 {
//!         ant.pop();
//!     }
//! });
//!
//! ant.push(Sym::Defending); // pauses Walking, begins Defending
//! while ant.is(&Sym::Defending) {
//!     ant.dispatch(Sym::Tick);
//! }
//! assert!(ant.is(&Sym::Walking)); // resumed once Defending popped
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, StackBuilder};
pub use crate::core::{
    Handler, Lifecycle, Symbol, TransitionLog, TransitionRecord, TransitionTable, Trigger,
    TriggerId, DEFAULT_LOG_CAPACITY,
};
pub use crate::machine::{StateMachine, StateStack};
