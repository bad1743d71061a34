//! Transient editing and calendar-navigation state.
//!
//! A [`SessionState`] is built once when the application starts and passed
//! by reference to whatever needs it. Nothing here performs I/O; it is
//! filled from [`crate::core::store::EntryStore`] results and drained into
//! [`EntryDraft`]s on save.

use thiserror::Error;

use crate::{
    entry::{DiaryEntry, EntryDraft},
    types::{CalendarView, DateError, EntryDate, MAX_PHOTOS, Mood, Photo, RelativeDay},
};

/// Invalid-input failures detected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A save was attempted with no mood selected.
    #[error("a mood must be selected before saving")]
    MissingMood,
}

/// Editing form plus calendar cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    selected_date: EntryDate,
    selected_mood: Option<Mood>,
    content: String,
    photos: Vec<Photo>,
    calendar_view: CalendarView,
    viewing_year: i32,
    viewing_month: u32,
    current_entry: Option<DiaryEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(EntryDate::today())
    }
}

impl SessionState {
    /// Fresh state with `today` selected and the calendar on its month.
    pub fn new(today: EntryDate) -> Self {
        Self {
            selected_date: today,
            selected_mood: None,
            content: String::new(),
            photos: Vec::new(),
            calendar_view: CalendarView::Month,
            viewing_year: today.year(),
            viewing_month: today.month(),
            current_entry: None,
        }
    }

    /// Date being edited.
    pub fn selected_date(&self) -> EntryDate {
        self.selected_date
    }

    /// Changes the date being edited.
    pub fn set_selected_date(&mut self, date: EntryDate) {
        self.selected_date = date;
    }

    /// Moves the selected date one day back.
    pub fn prev_day(&mut self) -> Result<EntryDate, DateError> {
        self.selected_date = self.selected_date.pred()?;
        Ok(self.selected_date)
    }

    /// Moves the selected date one day forward.
    pub fn next_day(&mut self) -> Result<EntryDate, DateError> {
        self.selected_date = self.selected_date.succ()?;
        Ok(self.selected_date)
    }

    /// Selects `today`.
    pub fn go_to_today(&mut self, today: EntryDate) {
        self.selected_date = today;
    }

    /// Label for the selected date when it is today or adjacent to it.
    pub fn relative_day(&self, today: EntryDate) -> Option<RelativeDay> {
        self.selected_date.relative_to(today)
    }

    /// Mood picked in the form, if any.
    pub fn selected_mood(&self) -> Option<Mood> {
        self.selected_mood
    }

    /// Picks or clears the mood.
    pub fn set_selected_mood(&mut self, mood: Option<Mood>) {
        self.selected_mood = mood;
    }

    /// Draft reflection text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the draft reflection text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Draft photos in display order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Appends a photo unless [`MAX_PHOTOS`] are already attached.
    /// Returns whether the photo was accepted.
    pub fn add_photo(&mut self, photo: impl Into<Photo>) -> bool {
        if self.photos.len() >= MAX_PHOTOS {
            return false;
        }
        self.photos.push(photo.into());
        true
    }

    /// Removes the photo at `index`; out of range does nothing.
    pub fn remove_photo(&mut self, index: usize) {
        if index < self.photos.len() {
            self.photos.remove(index);
        }
    }

    /// Drops every draft photo.
    pub fn clear_photos(&mut self) {
        self.photos.clear();
    }

    /// Month or year calendar.
    pub fn calendar_view(&self) -> CalendarView {
        self.calendar_view
    }

    /// Switches the calendar granularity.
    pub fn set_calendar_view(&mut self, view: CalendarView) {
        self.calendar_view = view;
    }

    /// Year shown by the calendar.
    pub fn viewing_year(&self) -> i32 {
        self.viewing_year
    }

    /// Moves the calendar to `year`.
    pub fn set_viewing_year(&mut self, year: i32) {
        self.viewing_year = year;
    }

    /// Month shown by the calendar, 1-based.
    pub fn viewing_month(&self) -> u32 {
        self.viewing_month
    }

    /// Moves the calendar to `month`; months outside 1..=12 are rejected
    /// and leave the cursor unchanged.
    pub fn set_viewing_month(&mut self, month: u32) -> Result<(), DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::OutOfRange {
                year: self.viewing_year,
                month,
            });
        }
        self.viewing_month = month;
        Ok(())
    }

    /// Last persisted entry loaded into the form.
    pub fn current_entry(&self) -> Option<&DiaryEntry> {
        self.current_entry.as_ref()
    }

    /// Replaces the cached persisted entry without touching the form.
    pub fn set_current_entry(&mut self, entry: Option<DiaryEntry>) {
        self.current_entry = entry;
    }

    /// True while viewing or editing a previously saved entry.
    pub fn has_saved_entry(&self) -> bool {
        self.current_entry.is_some()
    }

    /// Fills the form from a persisted entry and caches it.
    pub fn load_entry(&mut self, entry: DiaryEntry) {
        self.selected_date = entry.date;
        self.selected_mood = Some(entry.mood);
        self.content = entry.content.clone().unwrap_or_default();
        self.photos = entry.photos.clone();
        self.current_entry = Some(entry);
    }

    /// Clears mood, content, photos and the cached entry. The selected
    /// date and calendar cursor are kept.
    pub fn reset_form(&mut self) {
        self.selected_mood = None;
        self.content.clear();
        self.photos.clear();
        self.current_entry = None;
    }

    /// Builds the save payload for the selected date.
    ///
    /// Empty text is saved as absent content.
    pub fn draft(&self) -> Result<EntryDraft, SessionError> {
        let mood = self.selected_mood.ok_or(SessionError::MissingMood)?;
        Ok(EntryDraft {
            date: self.selected_date,
            mood,
            content: (!self.content.is_empty()).then(|| self.content.clone()),
            photos: self.photos.clone(),
        })
    }

    /// Steps the calendar back one month, wrapping into the previous year.
    pub fn prev_month(&mut self) {
        if self.viewing_month <= 1 {
            self.viewing_year = self.viewing_year.saturating_sub(1);
            self.viewing_month = 12;
        } else {
            self.viewing_month -= 1;
        }
    }

    /// Steps the calendar forward one month, wrapping into the next year.
    pub fn next_month(&mut self) {
        if self.viewing_month >= 12 {
            self.viewing_year = self.viewing_year.saturating_add(1);
            self.viewing_month = 1;
        } else {
            self.viewing_month += 1;
        }
    }

    /// Steps the calendar back one year.
    pub fn prev_year(&mut self) {
        self.viewing_year = self.viewing_year.saturating_sub(1);
    }

    /// Steps the calendar forward one year.
    pub fn next_year(&mut self) {
        self.viewing_year = self.viewing_year.saturating_add(1);
    }

    /// Picking a day from the year grid: focuses that month in month view.
    pub fn select_year_day(&mut self, date: EntryDate) {
        self.selected_date = date;
        self.viewing_year = date.year();
        self.viewing_month = date.month();
        self.calendar_view = CalendarView::Month;
    }
}
