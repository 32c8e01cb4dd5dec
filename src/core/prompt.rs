//! Yes/no decisions the stores need from whoever drives them.
//!
//! Core code asks a [`Question`]; the terminal layer renders it and
//! answers. Tests answer from a script.

use std::io;
use std::path::Path;

use super::sync::Addition;

#[derive(Debug, Clone, Copy)]
pub enum Question<'a> {
    /// The working data file is missing but a permanent copy exists.
    RestoreWorkingData { permanent: &'a Path },
    /// The permanent data file is missing; seed it from the working copy?
    SeedPermanentData { working: &'a Path, permanent: &'a Path },
    /// Lines found only in the working data file; overwrite permanent copies?
    ApplyAdditions { additions: &'a [Addition] },
}

pub trait Confirm {
    fn confirm(&mut self, question: Question<'_>) -> io::Result<bool>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Answers questions in order and remembers how many were asked.
    pub struct Scripted {
        answers: VecDeque<bool>,
        pub asked: usize,
    }

    impl Scripted {
        pub fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: 0,
            }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&mut self, question: Question<'_>) -> io::Result<bool> {
            self.asked += 1;
            self.answers.pop_front().ok_or_else(|| {
                io::Error::other(format!("unexpected question: {:?}", question))
            })
        }
    }
}
