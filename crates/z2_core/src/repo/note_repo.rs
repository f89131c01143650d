//! Note/tag repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist a note together with its tags and association rows.
//! - Resolve tags by exact name with find-or-create semantics.
//! - Read notes back with their tags.
//!
//! # Invariants
//! - `create_note` is all-or-nothing: tags, note and links commit together.
//! - At most one `tags` row exists per name; at most one `note_tags` row per
//!   (note, tag) pair.

use crate::db::DbError;
use crate::model::note::{Note, NoteDraft, NoteId, Tag};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note/tag persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note/tag operations.
pub trait NoteRepository {
    /// Inserts one note plus its tags in a single transaction.
    fn create_note(&mut self, draft: &NoteDraft) -> RepoResult<NoteId>;
    /// Gets one note with its tags by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Looks up one tag by exact name.
    fn find_tag(&self, name: &str) -> RepoResult<Option<Tag>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a schema-ready connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema was
    ///   not initialized.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&mut self, draft: &NoteDraft) -> RepoResult<NoteId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut tags = Vec::with_capacity(draft.tag_names.len());
        for name in &draft.tag_names {
            tags.push(find_or_create_tag(&tx, name)?);
        }

        tx.execute(
            "INSERT INTO notes (title, summary, body) VALUES (?1, ?2, ?3);",
            params![
                draft.title.as_deref(),
                draft.summary.as_deref(),
                draft.body.as_deref(),
            ],
        )?;
        let note_id = tx.last_insert_rowid();

        for tag in &tags {
            tx.execute(
                "INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?1, ?2);",
                params![note_id, tag.id],
            )?;
        }

        tx.commit()?;
        Ok(note_id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, summary, body FROM notes WHERE id = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, NoteId>("id")?,
                        row.get::<_, Option<String>>("title")?,
                        row.get::<_, Option<String>>("summary")?,
                        row.get::<_, Option<String>>("body")?,
                    ))
                },
            )
            .optional()?;

        let Some((id, title, summary, body)) = row else {
            return Ok(None);
        };

        Ok(Some(Note {
            id,
            title,
            summary,
            body,
            tags: load_tags_for_note(self.conn, id)?,
        }))
    }

    fn find_tag(&self, name: &str) -> RepoResult<Option<Tag>> {
        Ok(select_tag_by_name(self.conn, name)?)
    }
}

fn find_or_create_tag(tx: &Transaction<'_>, name: &str) -> RepoResult<Tag> {
    if let Some(tag) = select_tag_by_name(tx, name)? {
        return Ok(tag);
    }

    tx.execute("INSERT INTO tags (name) VALUES (?1);", [name])?;
    let id = tx.last_insert_rowid();
    debug!("event=tag_create module=repo status=ok tag_id={id}");
    Ok(Tag {
        id,
        name: name.to_string(),
    })
}

fn select_tag_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, name FROM tags WHERE name = ?1;",
        [name],
        |row| {
            Ok(Tag {
                id: row.get("id")?,
                name: row.get("name")?,
            })
        },
    )
    .optional()
}

fn load_tags_for_note(conn: &Connection, note_id: NoteId) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM note_tags nt
         INNER JOIN tags t ON t.id = nt.tag_id
         WHERE nt.note_id = ?1
         ORDER BY t.name ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        });
    }
    Ok(tags)
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    const REQUIRED: &[(&str, &[&str])] = &[
        ("tags", &["id", "name"]),
        ("notes", &["id", "title", "summary", "body"]),
        ("note_tags", &["note_id", "tag_id"]),
    ];

    for &(table, columns) in REQUIRED {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
