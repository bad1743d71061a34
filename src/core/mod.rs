//! Entry store logic and the in-memory table.

/// Helper index aliases.
pub mod indices;
/// In-memory [`crate::persist::EntryTable`] implementation.
pub mod memory;
/// Upsert-by-date store over any entry table.
pub mod store;
