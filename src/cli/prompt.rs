//! Terminal prompts
//!
//! Thin wrappers over `dialoguer` plus the terminal answer to the
//! questions core code asks through [`Confirm`].

use std::io;

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{Confirm as YesNo, Input, Select};

use crate::core::prompt::{Confirm, Question};

pub struct TermPrompt {
    term: Term,
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Clear the screen; a no-op when stdout is not a terminal.
    pub fn clear(&self) {
        if self.term.is_term() {
            let _ = self.term.clear_screen();
        }
    }

    pub fn yes_no(&self, prompt: &str) -> Result<bool> {
        Ok(YesNo::new().with_prompt(prompt).default(false).interact()?)
    }

    /// The `Do you wish to continue?` question asked after each action.
    pub fn keep_going(&self) -> Result<bool> {
        println!();
        self.yes_no("Do you wish to continue?")
    }

    /// Free text, trimmed. Empty answers are allowed.
    pub fn text(&self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    pub fn number(&self, prompt: &str) -> Result<usize> {
        Ok(Input::<usize>::new().with_prompt(prompt).interact_text()?)
    }

    pub fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn ask(&self, prompt: &str) -> io::Result<bool> {
        YesNo::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(io::Error::other)
    }
}

impl Confirm for TermPrompt {
    fn confirm(&mut self, question: Question<'_>) -> io::Result<bool> {
        match question {
            Question::RestoreWorkingData { permanent } => self.ask(&format!(
                "Permanent data file found at {}. Copy it into the working directory?",
                permanent.display()
            )),
            Question::SeedPermanentData { working, permanent } => {
                println!(
                    "{} Permanent data file {} does not exist.",
                    "!".yellow(),
                    permanent.display()
                );
                self.ask(&format!(
                    "Copy the current data file {} there?",
                    working.display()
                ))
            }
            Question::ApplyAdditions { additions } => {
                println!("Differences between current main data and permanent backup:");
                for (i, addition) in additions.iter().enumerate() {
                    match &addition.service {
                        Some(service) => println!("  {}. {}: {}", i + 1, service.cyan(), addition.value),
                        None => println!("  {}. {}", i + 1, addition.value),
                    }
                }
                self.ask("Do you want to make these changes permanent?")
            }
        }
    }
}
