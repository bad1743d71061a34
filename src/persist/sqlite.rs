//! SQLite-backed entry table.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, ffi, params};
use tracing::{debug, info};

use crate::{
    entry::{DiaryEntry, EntryDraft},
    types::{EntryDate, EntryId, Mood, Photo},
};

use super::{EntryTable, PersistError, PersistResult};

const SELECT_COLUMNS: &str = "SELECT id, date, mood, content, photos, created_at, updated_at FROM entries";

/// SQLite implementation of [`crate::persist::EntryTable`].
pub struct SqliteEntryTable {
    conn: Connection,
}

impl SqliteEntryTable {
    /// Opens or creates a database file at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("entry table opened at {}", path.display());
        Self::init_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Number of stored rows.
    pub fn len(&self) -> PersistResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> PersistResult<bool> {
        Ok(self.len()? == 0)
    }

    fn query_entries(&self, sql: &str, args: impl rusqlite::Params) -> PersistResult<Vec<DiaryEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, RawRow::from_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?.decode()?);
        }
        Ok(out)
    }
}

impl EntryTable for SqliteEntryTable {
    fn find_by_date(&self, date: EntryDate) -> PersistResult<Option<DiaryEntry>> {
        let raw = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE date = ?1 ORDER BY id ASC LIMIT 1"),
                params![date.to_string()],
                RawRow::from_row,
            )
            .optional()?;
        raw.map(RawRow::decode).transpose()
    }

    fn scan_dates(&self, start: EntryDate, end: EntryDate) -> PersistResult<Vec<DiaryEntry>> {
        self.query_entries(
            &format!("{SELECT_COLUMNS} WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC, id ASC"),
            params![start.to_string(), end.to_string()],
        )
    }

    fn scan_all(&self) -> PersistResult<Vec<DiaryEntry>> {
        self.query_entries(&format!("{SELECT_COLUMNS} ORDER BY date ASC, id ASC"), params![])
    }

    fn insert(&mut self, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<EntryId> {
        let photos = encode_photos(&draft.photos)?;
        let ts = at.timestamp_millis();
        let res = self.conn.execute(
            "INSERT INTO entries(date, mood, content, photos, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                draft.date.to_string(),
                draft.mood.as_str(),
                draft.content,
                photos,
                ts,
            ],
        );

        match res {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!(id, date = %draft.date, "inserted entry row");
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE => {
                Err(PersistError::DuplicateDate(draft.date))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn replace(&mut self, id: EntryId, draft: &EntryDraft, at: DateTime<Utc>) -> PersistResult<bool> {
        let photos = encode_photos(&draft.photos)?;
        let count = self.conn.execute(
            "UPDATE entries SET mood = ?2, content = ?3, photos = ?4, updated_at = ?5 WHERE id = ?1",
            params![id, draft.mood.as_str(), draft.content, photos, at.timestamp_millis()],
        )?;
        Ok(count > 0)
    }

    fn delete(&mut self, id: EntryId) -> PersistResult<bool> {
        let count = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

/// Column values as stored, before domain validation.
struct RawRow {
    id: i64,
    date: String,
    mood: String,
    content: Option<String>,
    photos: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            mood: row.get(2)?,
            content: row.get(3)?,
            photos: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn decode(self) -> PersistResult<DiaryEntry> {
        let corrupt = |what: String| PersistError::Corrupt(format!("entry {}: {what}", self.id));

        let date = self.date.parse::<EntryDate>().map_err(|e| corrupt(format!("{e}")))?;
        let mood = self.mood.parse::<Mood>().map_err(|e| corrupt(format!("{e}")))?;
        let photos = match &self.photos {
            Some(json) => serde_json::from_str::<Vec<Photo>>(json).map_err(|e| corrupt(format!("photos: {e}")))?,
            None => Vec::new(),
        };
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or_else(|| corrupt(format!("created_at {} out of range", self.created_at)))?;
        let updated_at = DateTime::from_timestamp_millis(self.updated_at)
            .ok_or_else(|| corrupt(format!("updated_at {} out of range", self.updated_at)))?;

        Ok(DiaryEntry {
            id: self.id,
            date,
            mood,
            content: self.content,
            photos,
            created_at,
            updated_at,
        })
    }
}

fn encode_photos(photos: &[Photo]) -> PersistResult<Option<String>> {
    if photos.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(photos)?))
}
