//! Runtime event stream payloads.

use crate::types::{EntryDate, EntryId};

/// Events emitted from the single-writer runtime loop after a write lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// First save for a date.
    Created {
        /// New entry id.
        id: EntryId,
        /// Date saved.
        date: EntryDate,
    },
    /// An existing entry was overwritten.
    Updated {
        /// Entry id.
        id: EntryId,
        /// Date saved.
        date: EntryDate,
    },
    /// An entry was removed.
    Deleted {
        /// Removed entry id.
        id: EntryId,
    },
}
