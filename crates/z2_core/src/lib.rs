//! Core domain logic for z2, a small note-taking tool.
//! This crate owns the note/tag schema and the create-note workflow.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::note::{Note, NoteDraft, NoteId, Tag, TagId};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{
    create_note, distinct_tag_names, BodySource, CreateNoteRequest, NoteService, NoteServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
