//! Month/year boundary math and the data behind calendar views.

use chrono::{Datelike, NaiveDate};
use hashbrown::HashMap;

use crate::{
    entry::DiaryEntry,
    types::{DateError, EntryDate, Mood, check_year_month},
};

/// Number of days in `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, DateError> {
    check_year_month(year, month)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    match (first, next) {
        (Some(first), Some(next)) => Ok((next - first).num_days() as u32),
        _ => Err(DateError::OutOfRange { year, month }),
    }
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Result<(EntryDate, EntryDate), DateError> {
    let last = days_in_month(year, month)?;
    Ok((EntryDate::from_ymd(year, month, 1)?, EntryDate::from_ymd(year, month, last)?))
}

/// `year-01-01` and `year-12-31`.
pub fn year_bounds(year: i32) -> Result<(EntryDate, EntryDate), DateError> {
    Ok((EntryDate::from_ymd(year, 1, 1)?, EntryDate::from_ymd(year, 12, 31)?))
}

/// Layout of one month in a Sunday-first week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-based.
    pub month: u32,
    /// Empty cells before day 1 (0 when the month starts on Sunday).
    pub leading_blanks: u32,
    /// Days in the month.
    pub days: u32,
}

impl MonthGrid {
    /// Computes the grid for a month.
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        let days = days_in_month(year, month)?;
        let first = EntryDate::from_ymd(year, month, 1)?;
        Ok(Self {
            year,
            month,
            leading_blanks: first.as_naive().weekday().num_days_from_sunday(),
            days,
        })
    }

    /// Blank cells followed by day numbers, row-major.
    pub fn cells(&self) -> Vec<Option<u32>> {
        (0..self.leading_blanks)
            .map(|_| None)
            .chain((1..=self.days).map(Some))
            .collect()
    }

    /// Date of `day` within this month.
    pub fn date(&self, day: u32) -> Result<EntryDate, DateError> {
        EntryDate::from_ymd(self.year, self.month, day)
    }
}

/// Keys entries by date for per-cell lookup. Later entries win on a
/// duplicate date.
pub fn index_by_date(entries: impl IntoIterator<Item = DiaryEntry>) -> HashMap<EntryDate, DiaryEntry> {
    entries.into_iter().map(|e| (e.date, e)).collect()
}

/// Entry counts per month, January first.
pub fn entries_per_month<'a>(entries: impl IntoIterator<Item = &'a DiaryEntry>) -> [usize; 12] {
    let mut counts = [0usize; 12];
    for entry in entries {
        counts[(entry.date.month() - 1) as usize] += 1;
    }
    counts
}

/// How often each mood was recorded.
pub fn mood_counts<'a>(entries: impl IntoIterator<Item = &'a DiaryEntry>) -> HashMap<Mood, usize> {
    let mut counts = HashMap::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    counts
}
