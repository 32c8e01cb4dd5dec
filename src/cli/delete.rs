//! Menu 3: delete the most recent entry of a service

use anyhow::Result;
use colored::Colorize;

use super::prompt::TermPrompt;
use super::{Flow, Session};

pub fn run(session: &mut Session, prompt: &TermPrompt) -> Result<Flow> {
    let service = prompt.text("Service name")?;

    let developer = session
        .ledger
        .latest(&service)
        .map(|entry| entry.developer().unwrap_or("unknown").to_string());

    match developer {
        None => println!("No entries found for API: {}", service),
        Some(developer) => {
            let question = format!(
                "Do you really want to delete the most recent entry for {} associated with {}?",
                service, developer
            );
            if prompt.yes_no(&question)? {
                session.ledger.remove_latest(&service);
                println!(
                    "{} Deleted the most recent entry for {} associated with {}",
                    "✓".green(),
                    service.cyan(),
                    developer
                );
                session.save();
            } else {
                println!("Deletion cancelled.");
            }
        }
    }

    Ok(Flow::from_answer(prompt.keep_going()?))
}
