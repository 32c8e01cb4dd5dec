//! Menu 1: add records
//!
//! Asks how many records to add (at most [`MAX_BATCH_ADD`]), then a
//! developer and an API name for each. Every record is saved and logged
//! right away.

use anyhow::Result;
use colored::Colorize;

use super::prompt::TermPrompt;
use super::{report, Flow, Session};
use crate::core::entry::{now_stamp, Entry};
use crate::core::error::RecordsError;

pub const MAX_BATCH_ADD: usize = 10;

pub fn run(session: &mut Session, prompt: &TermPrompt) -> Result<Flow> {
    let count = prompt.number("Number of records to add")?;

    if count > MAX_BATCH_ADD {
        println!(
            "More than {} entries are not allowed at once.",
            MAX_BATCH_ADD
        );
    } else {
        for _ in 0..count {
            let developer = prompt.text("Developer name")?;
            let service = prompt.text("API name")?;

            match assign(session, &service, &developer) {
                Ok(entry) => println!(
                    "{} {} assigned to {} at {}",
                    "✓".green(),
                    service.cyan(),
                    developer,
                    entry.timestamp()
                ),
                Err(err) => {
                    report(&err);
                    if matches!(
                        err,
                        RecordsError::EmptyInput(_) | RecordsError::InvalidServiceName(_)
                    ) && !prompt.yes_no("Continue with the remaining records?")?
                    {
                        break;
                    }
                }
            }
        }
    }

    Ok(Flow::from_answer(prompt.keep_going()?))
}

/// Record `developer` as the newest assignee of `service`, save the
/// ledger and append to the activity log.
///
/// Save problems are reported and do not undo the assignment; a log
/// failure is returned after the ledger is already saved.
pub fn assign(session: &mut Session, service: &str, developer: &str) -> Result<Entry, RecordsError> {
    let stamp = now_stamp();
    let entry = session.ledger.add(service, developer, &stamp)?.clone();
    session.save();
    session
        .log
        .record_assignment(&stamp, developer.trim(), service.trim())?;
    Ok(entry)
}
