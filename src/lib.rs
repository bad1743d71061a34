//! Personal mood journal: one entry per day, browsed by month and year.
//!
//! # Examples
//!
//! Synchronous usage with [`core::store::EntryStore`]:
//! ```
//! use moodlog::{core::store::EntryStore, entry::EntryDraft, types::Mood};
//!
//! let mut store = EntryStore::in_memory();
//! let date = "2024-05-01".parse().expect("date");
//! let id = store
//!     .upsert(&EntryDraft::new(date, Mood::Happy).with_content("good day"))
//!     .expect("upsert");
//! let again = store.upsert(&EntryDraft::new(date, Mood::Sad)).expect("upsert");
//! assert_eq!(id, again);
//! assert_eq!(store.get_by_month(2024, 5).expect("month").len(), 1);
//! ```
//!
//! Runtime usage with a SQLite file and session state:
//! ```no_run
//! use moodlog::{
//!     runtime::{
//!         config::{RuntimeConfig, open_store},
//!         flows::save_and_reset,
//!         handle::spawn_diary,
//!     },
//!     session::SessionState,
//!     types::Mood,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cfg = RuntimeConfig { db_path: Some("moodlog.db".into()), ..RuntimeConfig::default() };
//! let handle = spawn_diary(open_store(&cfg).expect("open sqlite"), cfg);
//! let mut session = SessionState::default();
//! session.set_selected_mood(Some(Mood::Neutral));
//! session.set_content("quiet evening");
//! let _id = save_and_reset(&handle, &mut session).await.expect("save");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Month/year boundaries and calendar grids.
pub mod calendar;
/// Entry store logic and in-memory table.
pub mod core;
/// Diary entry records and drafts.
pub mod entry;
/// Storage seam and SQLite implementation.
pub mod persist;
/// Single-writer runtime handle, events and flows.
pub mod runtime;
/// Transient editing and navigation state.
pub mod session;
/// Shared primitive types and enums.
pub mod types;
