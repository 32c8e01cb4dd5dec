//! Data store - the working copy of the ledger on disk
//!
//! # Key Points
//! - Load parses every line; malformed lines are skipped and reported.
//! - A missing working file can be restored from the permanent backup,
//!   with the user's consent. Retrying after the restore is bounded.
//! - Save rewrites the whole file from the ledger.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{RecordsError, Result};
use super::files::{copy_file, read_text, write_text};
use super::ledger::{Ledger, Parsed};
use super::prompt::{Confirm, Question};

/// File name of the data file, both working and permanent copies.
pub const DATA_FILE_NAME: &str = "DataSwaggerRecords.txt";

/// One read of the working file plus one read after a restore.
const MAX_LOAD_ATTEMPTS: usize = 2;

/// Where a loaded ledger came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The working file existed.
    Working,
    /// The working file was copied from the permanent backup first.
    Restored,
    /// Nothing was read. `backup_found` tells whether a restore was declined.
    Empty { backup_found: bool },
}

#[derive(Debug)]
pub struct Loaded {
    pub ledger: Ledger,
    pub source: LoadSource,
    /// Lines skipped because they had no `service:` prefix.
    pub skipped: Vec<String>,
}

/// How a save reached the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Written,
    /// The working file had vanished and was restored from backup first.
    RestoredThenWritten,
    /// Neither copy existed; a fresh working file was created.
    Created,
}

#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from the working file.
    ///
    /// When the working file is missing and `permanent` exists, asks
    /// whether to restore it; declining (or having no backup) yields an
    /// empty ledger.
    pub fn load(&self, permanent: &Path, confirm: &mut dyn Confirm) -> Result<Loaded> {
        let mut restored = false;

        for _ in 0..MAX_LOAD_ATTEMPTS {
            if self.path.exists() {
                let text = read_text("data file", &self.path)?;
                let Parsed { ledger, skipped } = Ledger::parse(&text);
                for line in &skipped {
                    warn!(line = %line, "skipping malformed data line");
                }
                info!(
                    path = %self.path.display(),
                    services = ledger.len(),
                    "loaded ledger"
                );
                let source = if restored {
                    LoadSource::Restored
                } else {
                    LoadSource::Working
                };
                return Ok(Loaded {
                    ledger,
                    source,
                    skipped,
                });
            }

            if restored {
                break;
            }

            warn!(path = %self.path.display(), "working data file not found");
            if !permanent.exists() {
                return Ok(Loaded::empty(false));
            }

            let restore = confirm
                .confirm(Question::RestoreWorkingData { permanent })
                .map_err(RecordsError::Prompt)?;
            if !restore {
                return Ok(Loaded::empty(true));
            }

            copy_file("permanent data file", permanent, &self.path)?;
            info!(from = %permanent.display(), "restored working data file");
            restored = true;
        }

        Err(RecordsError::NotFound {
            what: "data file",
            path: self.path.clone(),
        })
    }

    /// Rewrite the working file from `ledger`.
    pub fn save(&self, ledger: &Ledger, permanent: &Path) -> Result<Saved> {
        let outcome = if self.path.exists() {
            Saved::Written
        } else if permanent.exists() {
            warn!(
                path = %self.path.display(),
                "working data file vanished, restoring from backup before saving"
            );
            copy_file("permanent data file", permanent, &self.path)?;
            Saved::RestoredThenWritten
        } else {
            warn!(path = %self.path.display(), "no data file anywhere, creating a new one");
            Saved::Created
        };

        write_text("data file", &self.path, &ledger.render())?;
        debug!(path = %self.path.display(), ?outcome, "saved ledger");
        Ok(outcome)
    }
}

impl Loaded {
    fn empty(backup_found: bool) -> Self {
        Self {
            ledger: Ledger::new(),
            source: LoadSource::Empty { backup_found },
            skipped: Vec::new(),
        }
    }
}
