use rusqlite::Connection;
use z2_core::db::schema::SCHEMA_VERSION;
use z2_core::db::{open_db, open_db_in_memory, DbError};
use z2_core::{create_note, BodySource, CreateNoteRequest, NoteServiceError, Store};

#[test]
fn open_db_in_memory_creates_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "tags");
    assert_table_exists(&conn, "notes");
    assert_table_exists(&conn, "note_tags");
}

#[test]
fn opening_same_store_twice_keeps_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("z2.db");

    let mut first = Store::open(&path).unwrap();
    let note_id = create_note(&mut first, request("kept", &["keep"])).unwrap();
    first.close().unwrap();

    let second = Store::open(&path).unwrap();
    let conn = second.connection().unwrap();
    assert_eq!(schema_version(conn), SCHEMA_VERSION);
    assert_eq!(count(conn, "notes"), 1);
    assert_eq!(count(conn, "tags"), 1);
    let title: Option<String> = conn
        .query_row("SELECT title FROM notes WHERE id = ?1;", [note_id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(title.as_deref(), Some("kept"));
}

#[test]
fn schema_stamp_is_not_lowered_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stamped.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), 7);
    assert_table_exists(&conn, "notes");
}

#[test]
fn opening_store_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("z2.db");

    let err = Store::open(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn existing_unversioned_database_is_adopted_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE tags (id integer PRIMARY KEY AUTOINCREMENT, name text NOT NULL UNIQUE);
         CREATE TABLE notes (id integer PRIMARY KEY AUTOINCREMENT, title text, summary text, body text);
         CREATE TABLE note_tags (
            note_id integer,
            tag_id integer,
            PRIMARY KEY (note_id, tag_id),
            CONSTRAINT fk_note_tags_note FOREIGN KEY (note_id) REFERENCES notes(id),
            CONSTRAINT fk_note_tags_tag FOREIGN KEY (tag_id) REFERENCES tags(id)
         );
         INSERT INTO tags (name) VALUES ('go');
         INSERT INTO notes (title, summary, body) VALUES ('old', '', 'old body');
         INSERT INTO note_tags (note_id, tag_id) VALUES (1, 1);",
    )
    .unwrap();
    drop(conn);

    let mut store = Store::open(&path).unwrap();
    create_note(&mut store, request("new", &["go"])).unwrap();

    let conn = store.connection().unwrap();
    assert_eq!(schema_version(conn), SCHEMA_VERSION);
    assert_eq!(count(conn, "notes"), 2);
    assert_eq!(count(conn, "tags"), 1);
    assert_eq!(count(conn, "note_tags"), 2);
}

#[test]
fn close_twice_reports_closed_store() {
    let mut store = Store::open_in_memory().unwrap();
    assert!(store.is_open());

    store.close().unwrap();
    assert!(!store.is_open());
    assert!(matches!(store.close().unwrap_err(), DbError::Closed));
    assert!(matches!(store.connection().unwrap_err(), DbError::Closed));
}

#[test]
fn create_on_closed_store_is_store_unavailable() {
    let mut store = Store::open_in_memory().unwrap();
    store.close().unwrap();

    let err = create_note(&mut store, request("late", &[])).unwrap_err();
    assert!(matches!(err, NoteServiceError::StoreUnavailable(_)));
}

fn request(title: &str, tags: &[&str]) -> CreateNoteRequest {
    CreateNoteRequest {
        title: Some(title.to_string()),
        summary: None,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        body: BodySource::Inline(format!("{title} body")),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
