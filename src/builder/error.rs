//! Build errors for the machine builders.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition log capacity must be at least 1")]
    ZeroLogCapacity,
}
