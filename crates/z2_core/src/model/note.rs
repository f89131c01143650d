//! Note and tag domain model.
//!
//! # Responsibility
//! - Define persisted `Note`/`Tag` read models.
//! - Define `NoteDraft`, the write model handed to repositories.
//!
//! # Invariants
//! - Optional text fields distinguish "absent" (`None`, stored as NULL) from
//!   "present but empty" (`Some("")`).
//! - A note never references the same tag twice.

use serde::{Deserialize, Serialize};

/// Store-assigned note identifier.
pub type NoteId = i64;

/// Store-assigned tag identifier.
pub type TagId = i64;

/// Named label shared across notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    /// Unique, non-empty, matched exactly (case-sensitive).
    pub name: String,
}

/// Persisted note with its resolved tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    /// Associated tags sorted by name. Order carries no meaning.
    pub tags: Vec<Tag>,
}

impl Note {
    /// Returns associated tag names in stored order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }
}

/// Write model for one note insertion.
///
/// `tag_names` is expected to be distinct already; repositories still guard
/// against duplicate associations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub tag_names: Vec<String>,
}
