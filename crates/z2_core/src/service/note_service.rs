//! Create-note use-case.
//!
//! # Responsibility
//! - Resolve the note body from its source before touching the store.
//! - Collapse repeated tag names into one tag per distinct name.
//! - Map storage failures onto the `StoreUnavailable` / `PersistFailure`
//!   taxonomy reported to callers.
//!
//! # Invariants
//! - A failed create leaves the store exactly as it was.
//! - Tag names are matched exactly; no case folding or trimming.

use crate::db::{DbError, Store};
use crate::model::note::{NoteDraft, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, SqliteNoteRepository};
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// Service error for the create-note workflow.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Store is closed, could not be opened, or has no schema.
    StoreUnavailable(RepoError),
    /// Body source could not be read into text.
    BodyUnreadable { path: PathBuf, source: io::Error },
    /// Atomic write of note, tags and links failed and was rolled back.
    PersistFailure(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
            Self::BodyUnreadable { path, source } => {
                write!(f, "cannot read body file `{}`: {source}", path.display())
            }
            Self::PersistFailure(err) => write!(f, "failed to save note: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable(err) | Self::PersistFailure(err) => Some(err),
            Self::BodyUnreadable { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for NoteServiceError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(RepoError::Db(value))
    }
}

/// Where the note body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// Body text already in memory.
    Inline(String),
    /// UTF-8 file read in full.
    File(PathBuf),
}

impl BodySource {
    /// Resolves the source into body text.
    ///
    /// # Errors
    /// - `BodyUnreadable` when the file is missing, unreadable or not UTF-8.
    pub fn resolve(self) -> Result<String, NoteServiceError> {
        match self {
            Self::Inline(text) => Ok(text),
            Self::File(path) => match std::fs::read_to_string(&path) {
                Ok(text) => Ok(text),
                Err(source) => Err(NoteServiceError::BodyUnreadable { path, source }),
            },
        }
    }
}

/// Input for one create-note call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Tag names in caller order; repeats are tolerated.
    pub tags: Vec<String>,
    pub body: BodySource,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists one note and returns its id.
    ///
    /// The body is resolved first; nothing is written when that fails.
    pub fn create_note(&mut self, request: CreateNoteRequest) -> Result<NoteId, NoteServiceError> {
        let started_at = Instant::now();
        let body = match request.body.resolve() {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "event=note_create module=service status=error error_code=body_unreadable error={}",
                    err
                );
                return Err(err);
            }
        };

        let draft = NoteDraft {
            title: request.title,
            summary: request.summary,
            body: Some(body),
            tag_names: distinct_tag_names(&request.tags),
        };
        info!(
            "event=note_create module=service status=start tag_count={}",
            draft.tag_names.len()
        );

        match self.repo.create_note(&draft) {
            Ok(note_id) => {
                info!(
                    "event=note_create module=service status=ok note_id={} duration_ms={}",
                    note_id,
                    started_at.elapsed().as_millis()
                );
                Ok(note_id)
            }
            Err(err) => {
                error!(
                    "event=note_create module=service status=error duration_ms={} error_code=persist_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(NoteServiceError::PersistFailure(err))
            }
        }
    }
}

/// Runs the create-note workflow against an open store.
///
/// # Errors
/// - `StoreUnavailable` when `store` is closed or its schema is missing.
/// - `BodyUnreadable` / `PersistFailure` from [`NoteService::create_note`].
pub fn create_note(
    store: &mut Store,
    request: CreateNoteRequest,
) -> Result<NoteId, NoteServiceError> {
    let conn = store.connection_mut()?;
    let repo = SqliteNoteRepository::try_new(conn).map_err(NoteServiceError::StoreUnavailable)?;
    NoteService::new(repo).create_note(request)
}

/// Drops empty names and repeats, keeping first-seen order.
pub fn distinct_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{distinct_tag_names, BodySource, NoteServiceError};

    #[test]
    fn distinct_tag_names_keeps_first_occurrence_order() {
        let names = ["x", "y", "x", "", "Y"].map(String::from);
        assert_eq!(distinct_tag_names(&names), vec!["x", "y", "Y"]);
    }

    #[test]
    fn inline_body_resolves_verbatim() {
        let body = BodySource::Inline("# heading\n".to_string())
            .resolve()
            .expect("inline body should resolve");
        assert_eq!(body, "# heading\n");
    }

    #[test]
    fn missing_body_file_is_body_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.md");

        let err = BodySource::File(path.clone()).resolve().unwrap_err();
        match err {
            NoteServiceError::BodyUnreadable { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_body_file_is_body_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.md");
        std::fs::write(&path, [b'c', b'a', b'f', 0xE9, b'\n']).unwrap();

        let err = BodySource::File(path).resolve().unwrap_err();
        match err {
            NoteServiceError::BodyUnreadable { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
