//! Command dispatch and process-level error reporting.

use crate::cli::{Cli, Command, CreateArgs};
use crate::config::Settings;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use z2_core::{create_note, init_logging, BodySource, CreateNoteRequest, NoteServiceError, Store};

#[derive(Debug)]
pub enum CliError {
    /// Settings could not be resolved (e.g. unreadable working directory).
    Config(std::io::Error),
    Logging(String),
    Note(NoteServiceError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(message) => write!(f, "failed to initialize logging: {message}"),
            Self::Note(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Note(err) => Some(err),
        }
    }
}

impl From<NoteServiceError> for CliError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

/// Runs one command and returns the confirmation line to print.
///
/// The store is closed before returning, whether the command failed or not.
pub fn run(cli: Cli) -> Result<String, CliError> {
    let settings = Settings::from_cli(&cli).map_err(CliError::Config)?;
    let log_dir = settings
        .log_dir
        .as_deref()
        .map(|dir| dir.to_string_lossy().into_owned());
    init_logging(&settings.log_level, log_dir.as_deref()).map_err(CliError::Logging)?;

    let mut store = Store::open(&settings.db_path).map_err(NoteServiceError::from)?;
    let outcome = match cli.command {
        Command::Create(args) => create(&mut store, args),
    };
    let closed = store.close();

    let message = outcome?;
    closed.map_err(NoteServiceError::from)?;
    Ok(message)
}

fn create(store: &mut Store, args: CreateArgs) -> Result<String, CliError> {
    // Text flags always carry a value, so CLI notes never store NULL text.
    let request = CreateNoteRequest {
        title: Some(args.title),
        summary: Some(args.summary),
        tags: args.tags,
        body: BodySource::File(args.body_file),
    };
    let note_id = create_note(store, request)?;
    info!("event=cli_create module=cli status=ok note_id={note_id}");
    Ok(format!("Note created successfully! (id {note_id})"))
}
