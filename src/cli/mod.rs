//! CLI module - argument parsing, session state and the menu loop
//!
//! This is the only layer that talks to the user. Core operations return
//! values and `RecordsError`s; everything is rendered here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use crate::config::{Config, Workspace};
use crate::core::activity::ActivityLog;
use crate::core::data::{DataStore, LoadSource, Saved};
use crate::core::error::RecordsError;
use crate::core::ledger::Ledger;
use crate::core::prompt::Confirm;
use crate::core::sync::{sync_backups, SyncPaths};

pub mod add;
pub mod backup;
pub mod delete;
pub mod fetch;
pub mod prompt;

use prompt::TermPrompt;

/// swagrec - Swagger Records
///
/// Tracks which developer was last assigned to which API service.
#[derive(Parser, Debug)]
#[command(name = "swagrec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path (default: <workdir>/config.json)
    #[arg(short, long, env = "SWAGREC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the working data and log files
    #[arg(short = 'C', long, env = "SWAGREC_WORKDIR", default_value = ".")]
    pub workdir: PathBuf,
}

/// What the main menu does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Flow {
    fn from_answer(keep_going: bool) -> Self {
        if keep_going {
            Flow::Continue
        } else {
            Flow::Exit
        }
    }
}

const MAIN_MENU: [&str; 5] = [
    "1. Add record",
    "2. Fetch records",
    "3. Delete most recent entry",
    "4. Backup menu",
    "5. Save and exit",
];

/// Everything one run of the program works on.
pub struct Session {
    pub workspace: Workspace,
    pub config: Config,
    pub ledger: Ledger,
    pub data: DataStore,
    pub log: ActivityLog,
    /// False when the working file exists but could not be read; saving
    /// would then replace records the session never saw.
    pub loaded: bool,
}

impl Session {
    /// Load config (creating the default) and the ledger.
    pub fn open(workspace: Workspace, prompt: &mut dyn Confirm) -> Result<Self> {
        let (config, created) = Config::load_or_create(workspace.config_file())
            .with_context(|| {
                format!(
                    "Cannot load configuration from {}. Fix or delete it.",
                    workspace.config_file().display()
                )
            })?;
        if created {
            println!(
                "{} No configuration found, created {}",
                "!".yellow(),
                workspace.config_file().display()
            );
            print_locations(&config);
        }

        let data = DataStore::new(workspace.data_file());
        let log = ActivityLog::new(workspace.log_file());

        let mut loaded_ok = true;
        let ledger = match data.load(&config.permanent_backup_location, prompt) {
            Ok(loaded) => {
                for line in &loaded.skipped {
                    println!("{} Skipping malformed line: {}", "!".yellow(), line);
                }
                match loaded.source {
                    LoadSource::Working => {}
                    LoadSource::Restored => println!(
                        "{} Copied permanent data file to {}",
                        "✓".green(),
                        data.path().display()
                    ),
                    LoadSource::Empty { backup_found: true } => {
                        println!("Starting with an empty dataset.")
                    }
                    LoadSource::Empty { backup_found: false } => println!(
                        "No data file at {} and no permanent backup. Starting with an empty dataset.",
                        data.path().display()
                    ),
                }
                loaded.ledger
            }
            Err(err) => {
                report(&err);
                println!(
                    "Starting with an empty dataset. {} will not be overwritten this session.",
                    data.path().display()
                );
                loaded_ok = false;
                Ledger::new()
            }
        };

        Ok(Self {
            workspace,
            config,
            ledger,
            data,
            log,
            loaded: loaded_ok,
        })
    }

    pub fn sync_paths(&self) -> SyncPaths {
        SyncPaths {
            working_data: self.data.path().to_path_buf(),
            working_log: self.log.path().to_path_buf(),
            permanent_data: self.config.permanent_backup_location.clone(),
            permanent_log: self.config.permanent_log_location_dir.clone(),
        }
    }

    /// Rewrite the working data file, reporting instead of failing.
    pub fn save(&self) {
        if !self.loaded && self.data.path().exists() {
            eprintln!(
                "{} Not saving: {} could not be read at startup",
                "✗".red(),
                self.data.path().display()
            );
            return;
        }
        match self.data.save(&self.ledger, &self.config.permanent_backup_location) {
            Ok(Saved::Written) => {
                println!("Data saved to {}", self.data.path().display())
            }
            Ok(Saved::RestoredThenWritten) => println!(
                "Working file was missing; restored it from {} and saved",
                self.config.permanent_backup_location.display()
            ),
            Ok(Saved::Created) => {
                println!("Created {} and saved data", self.data.path().display())
            }
            Err(err) => report(&err),
        }
    }

    /// Reconcile with the permanent backups and show what happened.
    pub fn sync(&self, prompt: &mut dyn Confirm) {
        let paths = self.sync_paths();
        match sync_backups(&paths, prompt) {
            Ok(sync_report) => backup::print_sync_report(&sync_report, &paths),
            Err(err) => report(&err),
        }
    }

    /// Swap in a new config and persist it.
    pub fn replace_config(&mut self, config: Config) -> Result<(), RecordsError> {
        self.config = config;
        self.config.save_to(self.workspace.config_file())
    }
}

/// Print a core error. Every menu action ends up here on failure.
pub fn report(err: &RecordsError) {
    eprintln!("{} {}", "✗".red(), err);
}

pub fn print_locations(config: &Config) {
    println!(
        "  Main data backup: {}",
        config.permanent_backup_location.display()
    );
    println!(
        "  Log file backup:  {}",
        config.permanent_log_location_dir.display()
    );
}

pub fn run(cli: Cli) -> Result<()> {
    let workspace = Workspace::new(cli.workdir, cli.config);
    let mut prompt = TermPrompt::new();
    let mut session = Session::open(workspace, &mut prompt)?;

    println!(
        "\n{}\n",
        format!("+++ Welcome to Swagger Records v{} +++", env!("CARGO_PKG_VERSION")).bold()
    );

    let outcome = menu_loop(&mut session, &mut prompt);
    finish(&session, &mut prompt, outcome)
}

fn menu_loop(session: &mut Session, prompt: &mut TermPrompt) -> Result<()> {
    loop {
        let choice = prompt.select("Choose an action", &MAIN_MENU)?;
        prompt.clear();

        let flow = match choice {
            0 => add::run(session, prompt)?,
            1 => fetch::run(session, prompt)?,
            2 => delete::run(session, prompt)?,
            3 => backup::run(session, prompt)?,
            _ => Flow::Exit,
        };

        if flow == Flow::Exit {
            return Ok(());
        }
        prompt.clear();
    }
}

/// Save and sync on the way out, whether the menu ended normally or not.
/// The menu's own error, if any, is returned after the backups are done.
fn finish(session: &Session, confirm: &mut dyn Confirm, outcome: Result<()>) -> Result<()> {
    if let Err(err) = &outcome {
        eprintln!("{} {:#}", "✗".red(), err);
    }

    println!("{}", "***** Saving and backing up *****".bold());
    if !(session.ledger.is_empty() && !session.data.path().exists()) {
        session.save();
    }
    session.sync(confirm);
    println!("{}", "***** Exiting *****".bold());
    outcome
}
