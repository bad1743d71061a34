use std::collections::BTreeMap;

use crate::types::{EntryDate, EntryId};

/// Ordered date → id index; ordering gives inclusive range scans.
pub type DateIndex = BTreeMap<EntryDate, EntryId>;
