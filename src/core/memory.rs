use chrono::{DateTime, Utc};
use hashbrown::HashMap;

use crate::{
    entry::{DiaryEntry, EntryDraft},
    persist::{EntryTable, PersistError, PersistResult},
    types::{EntryDate, EntryId},
};

use super::indices::DateIndex;

/// Entry table held entirely in process memory.
///
/// Ids are assigned from a monotonic counter and never reused, matching
/// the auto-increment behavior of the SQLite table.
#[derive(Debug, Default)]
pub struct MemoryEntryTable {
    records: HashMap<EntryId, DiaryEntry>,
    by_date: DateIndex,
    next_id: EntryId,
}

impl MemoryEntryTable {
    /// Empty table; the first id is 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no rows are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn collect(&self, ids: impl Iterator<Item = EntryId>) -> Vec<DiaryEntry> {
        ids.filter_map(|id| self.records.get(&id).cloned()).collect()
    }
}

impl EntryTable for MemoryEntryTable {
    fn find_by_date(&self, date: EntryDate) -> PersistResult<Option<DiaryEntry>> {
        Ok(self
            .by_date
            .get(&date)
            .and_then(|id| self.records.get(id))
            .cloned())
    }

    fn scan_dates(&self, start: EntryDate, end: EntryDate) -> PersistResult<Vec<DiaryEntry>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.collect(self.by_date.range(start..=end).map(|(_, id)| *id)))
    }

    fn scan_all(&self) -> PersistResult<Vec<DiaryEntry>> {
        Ok(self.collect(self.by_date.values().copied()))
    }

    fn insert(&mut self, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<EntryId> {
        if self.by_date.contains_key(&draft.date) {
            return Err(PersistError::DuplicateDate(draft.date));
        }

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.by_date.insert(draft.date, id);
        self.records.insert(
            id,
            DiaryEntry {
                id,
                date: draft.date,
                mood: draft.mood,
                content: draft.content.clone(),
                photos: draft.photos.clone(),
                created_at: at,
                updated_at: at,
            },
        );
        Ok(id)
    }

    fn replace(&mut self, id: EntryId, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<bool> {
        let Some(rec) = self.records.get_mut(&id) else {
            return Ok(false);
        };
        rec.mood = draft.mood;
        rec.content = draft.content.clone();
        rec.photos = draft.photos.clone();
        rec.updated_at = at;
        Ok(true)
    }

    fn delete(&mut self, id: EntryId) -> PersistResult<bool> {
        let Some(rec) = self.records.remove(&id) else {
            return Ok(false);
        };
        self.by_date.remove(&rec.date);
        Ok(true)
    }
}
