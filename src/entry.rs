//! Diary entry record and its write-side draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EntryDate, EntryId, Mood, Photo};

/// Persisted diary record, one per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Store-assigned identity.
    pub id: EntryId,
    /// Natural key.
    pub date: EntryDate,
    /// Recorded mood.
    pub mood: Mood,
    /// Free-text reflection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attached inline images, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    /// Set once, when the date is first saved.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every save of the date.
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Returns the writable fields of this entry as a draft.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            date: self.date,
            mood: self.mood,
            content: self.content.clone(),
            photos: self.photos.clone(),
        }
    }
}

/// Write payload for [`crate::core::store::EntryStore::upsert`].
///
/// Saving a draft replaces `mood`, `content` and `photos` of the stored
/// entry wholesale; a `None` content clears any previous text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Date the entry belongs to.
    pub date: EntryDate,
    /// Mood to record.
    pub mood: Mood,
    /// Optional reflection text.
    #[serde(default)]
    pub content: Option<String>,
    /// Photos to attach.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl EntryDraft {
    /// Draft with only the required fields set.
    pub fn new(date: EntryDate, mood: Mood) -> Self {
        Self {
            date,
            mood,
            content: None,
            photos: Vec::new(),
        }
    }

    /// Sets the reflection text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the attached photos.
    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = photos;
        self
    }
}
