//! Shared primitive IDs, the mood vocabulary, and the on-disk date key.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned entry identifier.
pub type EntryId = i64;

/// Inline-encoded image payload (typically a `data:` URL).
pub type Photo = String;

/// Upper bound on photos attached to one entry.
pub const MAX_PHOTOS: usize = 3;

/// Errors raised while parsing or constructing an [`EntryDate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Input is not in the literal `YYYY-MM-DD` shape.
    #[error("malformed date {0:?}, expected YYYY-MM-DD")]
    Malformed(String),
    /// Input has the right shape but names no calendar day.
    #[error("no such calendar day: {0}")]
    Invalid(String),
    /// Year or month argument outside the supported range.
    #[error("year {year} / month {month} out of range")]
    OutOfRange {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}

/// Calendar day used as the natural key of an entry.
///
/// Always rendered as zero-padded `YYYY-MM-DD`, so lexicographic order of
/// the rendered form matches chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    /// Smallest supported year.
    pub const MIN_YEAR: i32 = 1;
    /// Largest supported year; keeps the rendered year at four digits.
    pub const MAX_YEAR: i32 = 9999;

    /// Builds a date from its components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        check_year_month(year, month)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateError::Invalid(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1-based.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-based.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Underlying chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day.
    pub fn succ(&self) -> Result<Self, DateError> {
        self.0
            .succ_opt()
            .filter(|d| d.year() <= Self::MAX_YEAR)
            .map(Self)
            .ok_or(DateError::OutOfRange {
                year: self.year().saturating_add(1),
                month: 1,
            })
    }

    /// The preceding calendar day.
    pub fn pred(&self) -> Result<Self, DateError> {
        self.0
            .pred_opt()
            .filter(|d| d.year() >= Self::MIN_YEAR)
            .map(Self)
            .ok_or(DateError::OutOfRange {
                year: self.year().saturating_sub(1),
                month: 12,
            })
    }

    /// Names this date relative to `today`, when it is adjacent to it.
    pub fn relative_to(&self, today: EntryDate) -> Option<RelativeDay> {
        match (self.0 - today.0).num_days() {
            0 => Some(RelativeDay::Today),
            -1 => Some(RelativeDay::Yesterday),
            1 => Some(RelativeDay::Tomorrow),
            _ => None,
        }
    }
}

/// A date's position next to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeDay {
    /// The current day.
    Today,
    /// One day before.
    Yesterday,
    /// One day after.
    Tomorrow,
}

pub(crate) fn check_year_month(year: i32, month: u32) -> Result<(), DateError> {
    if !(EntryDate::MIN_YEAR..=EntryDate::MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return Err(DateError::OutOfRange { year, month });
    }
    Ok(())
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for EntryDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shaped {
            return Err(DateError::Malformed(s.to_string()));
        }

        // Shape is fixed, so these slices are all ASCII digits.
        let year: i32 = s[0..4].parse().map_err(|_| DateError::Malformed(s.to_string()))?;
        let month: u32 = s[5..7].parse().map_err(|_| DateError::Malformed(s.to_string()))?;
        let day: u32 = s[8..10].parse().map_err(|_| DateError::Malformed(s.to_string()))?;

        if year < Self::MIN_YEAR {
            return Err(DateError::Invalid(s.to_string()));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for EntryDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryDate> for String {
    fn from(value: EntryDate) -> Self {
        value.to_string()
    }
}

/// Categorical emotional state attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Happy.
    Happy,
    /// Calm, neither up nor down.
    Neutral,
    /// Worried.
    Worried,
    /// Sad.
    Sad,
    /// Angry.
    Angry,
}

impl Mood {
    /// Every mood in picker order.
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Neutral, Mood::Worried, Mood::Sad, Mood::Angry];

    /// Persisted spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Worried => "worried",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected mood spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood {0:?}")]
pub struct ParseMoodError(pub String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

/// Calendar browsing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    /// One month of days.
    #[default]
    Month,
    /// Twelve compact months.
    Year,
}
