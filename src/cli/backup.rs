//! Menu 4: permanent backups
//!
//! Show where the permanent copies live, force a sync, or move them to
//! another directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::prompt::TermPrompt;
use super::{print_locations, report, Flow, Session};
use crate::core::error::RecordsError;
use crate::core::relocate::relocate_backups;
use crate::core::sync::{LogSeed, SyncOutcome, SyncPaths, SyncReport};

const BACKUP_MENU: [&str; 4] = [
    "1. Show permanent backup locations",
    "2. Save and sync backups now",
    "3. Move permanent backups to another directory",
    "4. Back",
];

pub fn run(session: &mut Session, prompt: &mut TermPrompt) -> Result<Flow> {
    loop {
        let choice = prompt.select("Backup", &BACKUP_MENU)?;
        prompt.clear();

        match choice {
            0 => {
                println!("The current permanent backup locations are:");
                print_locations(&session.config);
            }
            1 => {
                println!("{}", "***** Saving and syncing backups *****".bold());
                session.save();
                session.sync(prompt);
            }
            2 => relocate(session, prompt)?,
            _ => break,
        }

        if !prompt.keep_going()? {
            break;
        }
        prompt.clear();
    }
    Ok(Flow::Continue)
}

fn relocate(session: &mut Session, prompt: &TermPrompt) -> Result<()> {
    let dir = prompt.text("New backup directory")?;
    if dir.is_empty() {
        report(&RecordsError::EmptyInput("backup directory"));
        return Ok(());
    }

    match relocate_backups(&session.config, Path::new(&dir)) {
        Ok(config) => {
            println!(
                "{} Backup file moved to {}",
                "✓".green(),
                config.permanent_backup_location.display()
            );
            println!(
                "{} Log file moved to {}",
                "✓".green(),
                config.permanent_log_location_dir.display()
            );
            match session.replace_config(config) {
                Ok(()) => println!("Configuration updated successfully."),
                Err(err) => report(&err),
            }
        }
        Err(err) => report(&err),
    }
    Ok(())
}

pub fn print_sync_report(sync_report: &SyncReport, paths: &SyncPaths) {
    if sync_report.seeded_data {
        println!(
            "{} Created permanent data file {}",
            "✓".green(),
            paths.permanent_data.display()
        );
    }
    match sync_report.log_seed {
        LogSeed::NotNeeded => {}
        LogSeed::Seeded => println!(
            "{} Permanent log file did not exist; seeded {} from the working log",
            "!".yellow(),
            paths.permanent_log.display()
        ),
        LogSeed::NoWorkingLog => println!(
            "{} No activity log yet; {} was not created",
            "!".yellow(),
            paths.permanent_log.display()
        ),
    }

    match &sync_report.outcome {
        SyncOutcome::NoWorkingData => println!(
            "Current main data file {} does not exist. Nothing to sync.",
            paths.working_data.display()
        ),
        SyncOutcome::SeedDeclined => {
            println!("Sync aborted: permanent data file was not created.")
        }
        SyncOutcome::UpToDate => println!("No differences found. Backups are already synced."),
        SyncOutcome::Declined { .. } => println!("Sync operation aborted."),
        SyncOutcome::Synced {
            additions,
            log_copied,
        } => {
            println!(
                "{} Main data file synced to {} ({} new line(s))",
                "✓".green(),
                paths.permanent_data.display(),
                additions.len()
            );
            if *log_copied {
                println!(
                    "{} Log file synced to {}",
                    "✓".green(),
                    paths.permanent_log.display()
                );
            } else {
                println!(
                    "{} No working log to copy; {} left as is",
                    "!".yellow(),
                    paths.permanent_log.display()
                );
            }
        }
    }
}
