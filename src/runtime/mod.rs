//! Single-writer async runtime, change events and UI flows.

/// Runtime configuration and store opening.
pub mod config;
/// Event stream types emitted by the runtime.
pub mod events;
/// Composite operations tying session state to the store.
pub mod flows;
/// Handle and command loop implementation.
pub mod handle;
