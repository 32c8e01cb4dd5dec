//! Activity log - append-only history of assignments
//!
//! Lines look like `[<timestamp>]: <developer> --> <service>` and are
//! stored newest-first, so appending rewrites the file with the new line
//! on top. Logs stay small enough for that to be fine.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::Result;
use super::files::{copy_file, read_text, write_text};

/// File name of the activity log, both working and permanent copies.
pub const LOG_FILE_NAME: &str = "log_SwaggerRecords.pkl";

/// How many entries the fetch menu shows.
pub const DEFAULT_TOP: usize = 10;

/// Most recent log lines, plus whether the working log had to be
/// recovered from the permanent copy to read them.
#[derive(Debug)]
pub struct TopLines {
    pub lines: Vec<String>,
    pub recovered: bool,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepend `[timestamp]: message`.
    pub fn append(&self, timestamp: &str, message: &str) -> Result<()> {
        let existing = if self.path.exists() {
            read_text("log file", &self.path)?
        } else {
            String::new()
        };

        let mut text = format!("[{}]: {}\n", timestamp, message);
        text.push_str(&existing);
        write_text("log file", &self.path, &text)?;

        debug!(path = %self.path.display(), line = message, "appended activity log line");
        Ok(())
    }

    pub fn record_assignment(&self, timestamp: &str, developer: &str, service: &str) -> Result<()> {
        self.append(timestamp, &format!("{} --> {}", developer, service))
    }

    /// First `n` lines of the working log, recovering it from `permanent`
    /// once if it is missing.
    pub fn top(&self, n: usize, permanent: &Path) -> Result<TopLines> {
        let mut recovered = false;
        if !self.path.exists() {
            copy_file("permanent log file", permanent, &self.path)?;
            info!(from = %permanent.display(), "recovered working log from permanent copy");
            recovered = true;
        }

        let text = read_text("log file", &self.path)?;
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(n)
            .map(|line| line.trim().to_string())
            .collect();

        Ok(TopLines { lines, recovered })
    }
}
