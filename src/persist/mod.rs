/// SQLite table.
pub mod sqlite;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    entry::{DiaryEntry, EntryDraft},
    types::{EntryDate, EntryId},
};

/// Storage-layer failures.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Driver or file error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Photo list could not be encoded.
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    /// Insert would create a second row for this date.
    #[error("an entry for {0} already exists")]
    DuplicateDate(EntryDate),
    /// A stored row does not decode into a valid entry.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Result alias for table operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable table of diary entries.
///
/// Implementations keep at most one row per date and reject an insert
/// that would create a second one with [`PersistError::DuplicateDate`].
pub trait EntryTable: Send {
    /// Row for `date`, if any.
    fn find_by_date(&self, date: EntryDate) -> PersistResult<Option<DiaryEntry>>;
    /// Inclusive scan ordered by date. Callers guarantee `start <= end`.
    fn scan_dates(&self, start: EntryDate, end: EntryDate) -> PersistResult<Vec<DiaryEntry>>;
    /// Every row ordered by date.
    fn scan_all(&self) -> PersistResult<Vec<DiaryEntry>>;
    /// Creates a row with `created_at = updated_at = at` and returns its id.
    fn insert(&mut self, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<EntryId>;
    /// Overwrites mood, content and photos and sets `updated_at`.
    /// Returns false when no row has this id.
    fn replace(&mut self, id: EntryId, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<bool>;
    /// Removes the row with `id`. Returns whether it existed.
    fn delete(&mut self, id: EntryId) -> PersistResult<bool>;
    /// Makes prior writes durable; a no-op by default.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}
