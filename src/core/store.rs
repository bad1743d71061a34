use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
    calendar,
    entry::{DiaryEntry, EntryDraft},
    persist::{EntryTable, PersistError},
    types::{DateError, EntryDate, EntryId},
};

use super::memory::MemoryEntryTable;

/// Failures of [`EntryStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying table could not be read or written.
    #[error("storage unavailable: {0}")]
    Persist(#[from] PersistError),
    /// A year, month or date argument was out of range.
    #[error(transparent)]
    Date(#[from] DateError),
}

impl StoreError {
    /// True for failures of the storage layer itself, as opposed to bad input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Persist(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a single [`EntryStore::upsert_outcome`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed for the date; a new row was created.
    Inserted(EntryId),
    /// The existing entry for the date was overwritten in place.
    Updated(EntryId),
}

impl UpsertOutcome {
    /// Id of the row written.
    pub fn id(&self) -> EntryId {
        match self {
            Self::Inserted(id) | Self::Updated(id) => *id,
        }
    }
}

/// Source of write timestamps.
pub type Clock = Box<dyn FnMut() -> DateTime<Utc> + Send>;

/// Sole owner of diary entries, keyed by date on top of an id-keyed table.
pub struct EntryStore {
    table: Box<dyn EntryTable>,
    clock: Clock,
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore").finish_non_exhaustive()
    }
}

impl EntryStore {
    /// Store over `table`, stamping writes with the system clock.
    pub fn new(table: Box<dyn EntryTable>) -> Self {
        Self::with_clock(table, Box::new(Utc::now))
    }

    /// Store over `table` with an injected clock.
    pub fn with_clock(table: Box<dyn EntryTable>, clock: Clock) -> Self {
        Self { table, clock }
    }

    /// Store over a fresh [`MemoryEntryTable`].
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryEntryTable::new()))
    }

    /// Entry saved for `date`, if any.
    pub fn get_by_date(&self, date: EntryDate) -> StoreResult<Option<DiaryEntry>> {
        Ok(self.table.find_by_date(date)?)
    }

    /// Inclusive range ordered by date. An inverted range is empty.
    pub fn get_by_date_range(&self, start: EntryDate, end: EntryDate) -> StoreResult<Vec<DiaryEntry>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.table.scan_dates(start, end)?)
    }

    /// Entries in one calendar month, ordered by date.
    pub fn get_by_month(&self, year: i32, month: u32) -> StoreResult<Vec<DiaryEntry>> {
        let (start, end) = calendar::month_bounds(year, month)?;
        self.get_by_date_range(start, end)
    }

    /// Entries in one calendar year, ordered by date.
    pub fn get_by_year(&self, year: i32) -> StoreResult<Vec<DiaryEntry>> {
        let (start, end) = calendar::year_bounds(year)?;
        self.get_by_date_range(start, end)
    }

    /// Every entry ordered by date.
    pub fn get_all(&self) -> StoreResult<Vec<DiaryEntry>> {
        Ok(self.table.scan_all()?)
    }

    /// Saves `draft` as the entry for its date and returns the entry id.
    pub fn upsert(&mut self, draft: &EntryDraft) -> StoreResult<EntryId> {
        self.upsert_outcome(draft).map(|o| o.id())
    }

    /// Like [`Self::upsert`], also reporting whether a row was created.
    ///
    /// Read-then-write; the caller is the only writer.
    pub fn upsert_outcome(&mut self, draft: &EntryDraft) -> StoreResult<UpsertOutcome> {
        let now = self.now();

        if let Some(existing) = self.table.find_by_date(draft.date)? {
            let at = now.max(existing.updated_at);
            if self.table.replace(existing.id, draft, at)? {
                debug!(id = existing.id, date = %draft.date, mood = %draft.mood, "entry updated");
                return Ok(UpsertOutcome::Updated(existing.id));
            }
        }

        let id = self.table.insert(draft, now)?;
        debug!(id, date = %draft.date, mood = %draft.mood, "entry created");
        Ok(UpsertOutcome::Inserted(id))
    }

    /// Removes the entry with `id`. Returns whether a row existed; a missing
    /// id is not an error.
    pub fn delete_by_id(&mut self, id: EntryId) -> StoreResult<bool> {
        let removed = self.table.delete(id)?;
        debug!(id, removed, "entry delete");
        Ok(removed)
    }

    /// Flushes the underlying table.
    pub fn flush(&mut self) -> StoreResult<()> {
        Ok(self.table.flush()?)
    }

    // Millisecond precision matches what the SQLite table can round-trip.
    fn now(&mut self) -> DateTime<Utc> {
        (self.clock)().trunc_subsecs(3)
    }
}
