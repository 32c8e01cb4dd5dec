//! Sync - reconcile working copies with the permanent backups
//!
//! One linear pass per call:
//! 1. no working data file: nothing to sync
//! 2. no permanent data file: ask to seed it from the working copy
//! 3. no permanent log file: seed it from the working log, no prompt
//! 4. collect working data lines missing from the permanent copy
//! 5. none: already synced
//! 6. otherwise ask, then overwrite both permanent files wholesale
//!
//! Step 4 only notices additions. Removed or reordered lines do not
//! count as differences.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::{RecordsError, Result};
use super::files::{copy_file, read_text};
use super::prompt::{Confirm, Question};

/// The four files a sync touches.
#[derive(Debug, Clone)]
pub struct SyncPaths {
    pub working_data: PathBuf,
    pub working_log: PathBuf,
    pub permanent_data: PathBuf,
    pub permanent_log: PathBuf,
}

/// A working data line the permanent copy does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addition {
    pub line: String,
    /// Service the line belongs to, when it has a `service:` prefix.
    pub service: Option<String>,
    /// The entry text after the prefix, or the whole line.
    pub value: String,
}

impl Addition {
    fn from_line(line: &str) -> Self {
        match line.split_once(':') {
            Some((service, value)) => Self {
                line: line.to_string(),
                service: Some(service.trim().to_string()),
                value: value.trim().to_string(),
            },
            None => Self {
                line: line.to_string(),
                service: None,
                value: line.trim().to_string(),
            },
        }
    }
}

/// What happened to the permanent log before diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeed {
    /// The permanent log already existed (or the pass stopped earlier).
    NotNeeded,
    Seeded,
    /// Neither log copy exists yet.
    NoWorkingLog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    NoWorkingData,
    SeedDeclined,
    UpToDate,
    Declined { additions: Vec<Addition> },
    Synced {
        additions: Vec<Addition>,
        log_copied: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub seeded_data: bool,
    pub log_seed: LogSeed,
    pub outcome: SyncOutcome,
}

impl SyncReport {
    fn stop(seeded_data: bool, log_seed: LogSeed, outcome: SyncOutcome) -> Self {
        Self {
            seeded_data,
            log_seed,
            outcome,
        }
    }
}

/// Lines of `working` absent from `permanent`, in working order.
pub fn find_additions(working: &str, permanent: &str) -> Vec<Addition> {
    let known: HashSet<&str> = permanent.lines().collect();
    working
        .lines()
        .filter(|line| !line.trim().is_empty() && !known.contains(line))
        .map(Addition::from_line)
        .collect()
}

pub fn sync_backups(paths: &SyncPaths, confirm: &mut dyn Confirm) -> Result<SyncReport> {
    if !paths.working_data.exists() {
        info!(path = %paths.working_data.display(), "no working data file, nothing to sync");
        return Ok(SyncReport::stop(
            false,
            LogSeed::NotNeeded,
            SyncOutcome::NoWorkingData,
        ));
    }

    let mut seeded_data = false;
    if !paths.permanent_data.exists() {
        let seed = ask(
            confirm,
            Question::SeedPermanentData {
                working: &paths.working_data,
                permanent: &paths.permanent_data,
            },
        )?;
        if !seed {
            return Ok(SyncReport::stop(
                false,
                LogSeed::NotNeeded,
                SyncOutcome::SeedDeclined,
            ));
        }
        copy_file("working data file", &paths.working_data, &paths.permanent_data)?;
        info!(path = %paths.permanent_data.display(), "seeded permanent data file");
        seeded_data = true;
    }

    let log_seed = seed_log(&paths.working_log, &paths.permanent_log)?;

    let working = read_text("working data file", &paths.working_data)?;
    let permanent = read_text("permanent data file", &paths.permanent_data)?;
    let additions = find_additions(&working, &permanent);
    debug!(count = additions.len(), "computed additions");

    if additions.is_empty() {
        return Ok(SyncReport::stop(seeded_data, log_seed, SyncOutcome::UpToDate));
    }

    let apply = ask(
        confirm,
        Question::ApplyAdditions {
            additions: &additions,
        },
    )?;
    if !apply {
        info!("sync declined, permanent copies untouched");
        return Ok(SyncReport::stop(
            seeded_data,
            log_seed,
            SyncOutcome::Declined { additions },
        ));
    }

    copy_file("working data file", &paths.working_data, &paths.permanent_data)?;
    let log_copied = paths.working_log.exists();
    if log_copied {
        copy_file("working log file", &paths.working_log, &paths.permanent_log)?;
    }
    info!(
        lines = additions.len(),
        log_copied, "permanent backups overwritten from working copies"
    );

    Ok(SyncReport::stop(
        seeded_data,
        log_seed,
        SyncOutcome::Synced {
            additions,
            log_copied,
        },
    ))
}

fn seed_log(working: &Path, permanent: &Path) -> Result<LogSeed> {
    if permanent.exists() {
        return Ok(LogSeed::NotNeeded);
    }
    if !working.exists() {
        return Ok(LogSeed::NoWorkingLog);
    }
    copy_file("working log file", working, permanent)?;
    info!(path = %permanent.display(), "seeded permanent log file");
    Ok(LogSeed::Seeded)
}

fn ask(confirm: &mut dyn Confirm, question: Question<'_>) -> Result<bool> {
    confirm.confirm(question).map_err(RecordsError::Prompt)
}
