//! Runtime settings resolved from flags and environment.

use crate::cli::Cli;
use std::io;
use std::path::{Path, PathBuf};

/// Stderr logging stays quiet unless asked otherwise.
const STDERR_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute log directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> io::Result<Self> {
        let log_dir = match cli.log_dir.as_deref() {
            Some(dir) => Some(absolutize(dir)?),
            None => None,
        };
        let log_level = match (&cli.log_level, &log_dir) {
            (Some(level), _) => level.clone(),
            (None, Some(_)) => z2_core::default_log_level().to_string(),
            (None, None) => STDERR_LOG_LEVEL.to_string(),
        };

        Ok(Self {
            db_path: cli.db.clone(),
            log_level,
            log_dir,
        })
    }
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
