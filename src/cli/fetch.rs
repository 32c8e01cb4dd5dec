//! Menu 2: fetch records
//!
//! Either the latest activity log lines or the history of one service.

use anyhow::Result;
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::prompt::TermPrompt;
use super::{report, Flow, Session};
use crate::core::activity::DEFAULT_TOP;
use crate::core::error::RecordsError;
use crate::core::ledger::Ledger;

const FETCH_MENU: [&str; 3] = [
    "1. Latest activity log entries",
    "2. Records for one service",
    "3. Back",
];

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Assigned at")]
    assigned_at: String,
    #[tabled(rename = "Developer")]
    developer: String,
}

pub fn run(session: &Session, prompt: &TermPrompt) -> Result<Flow> {
    loop {
        let choice = prompt.select("Fetch", &FETCH_MENU)?;
        prompt.clear();

        match choice {
            0 => show_logs(session),
            1 => {
                let service = prompt.text("Service name")?;
                match entries_table(&session.ledger, &service) {
                    Some(table) => {
                        println!("Entries for {}:", service.cyan());
                        println!("{}", table);
                    }
                    None => println!("No entries found for API: {}", service),
                }
            }
            _ => break,
        }

        if !prompt.keep_going()? {
            break;
        }
        prompt.clear();
    }
    Ok(Flow::Continue)
}

fn show_logs(session: &Session) {
    println!("Log entries are permanent once assigned.");
    match session
        .log
        .top(DEFAULT_TOP, &session.config.permanent_log_location_dir)
    {
        Ok(top) => {
            if top.recovered {
                println!(
                    "{} Working log was missing; copied it from {}",
                    "!".yellow(),
                    session.config.permanent_log_location_dir.display()
                );
            }
            if top.lines.is_empty() {
                println!("No logs available.");
                return;
            }
            println!("{}", "=== Top Logs ===".bold());
            for (i, line) in top.lines.iter().enumerate() {
                println!("{}: {}", i + 1, line);
            }
        }
        Err(err @ RecordsError::NotFound { .. }) => {
            println!("No logs available.");
            report(&err);
        }
        Err(err) => report(&err),
    }
}

/// History of `service` as a table, `None` when it has no entries.
pub fn entries_table(ledger: &Ledger, service: &str) -> Option<String> {
    let entries = ledger.get(service.trim())?;
    let rows = entries.iter().enumerate().map(|(i, entry)| EntryRow {
        index: i + 1,
        assigned_at: entry.timestamp().to_string(),
        developer: entry.developer().unwrap_or("-").to_string(),
    });
    Some(Table::new(rows).with(Style::rounded()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_table_lists_newest_first() {
        let ledger = Ledger::parse(
            "orders-api: 2024-01-02 09:00:00, bob\norders-api: 2024-01-01 10:00:00, alice\n",
        )
        .ledger;

        let table = entries_table(&ledger, "orders-api").unwrap();
        let bob = table.find("bob").unwrap();
        let alice = table.find("alice").unwrap();
        assert!(bob < alice);
        assert!(table.contains("Assigned at"));
    }

    #[test]
    fn test_entries_table_unknown_service() {
        let ledger = Ledger::parse("x: 1, a\n").ledger;
        assert!(entries_table(&ledger, "missing-api").is_none());
        assert!(entries_table(&ledger, "").is_none());
    }
}
