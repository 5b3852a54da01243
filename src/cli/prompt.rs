//! Interactive selection and confirmation.
//!
//! Commands ask through [`Prompter`] and never touch the terminal directly, so
//! the same flow runs in scripts (where every question has a fixed answer).

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Select};

use crate::error::Result;

/// Asks the user to choose or confirm.
pub trait Prompter {
    /// Pick one of `items`. `None` means no choice can be made.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Yes/no question, defaulting to no.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Prompts on the terminal with dialoguer.
#[derive(Debug, Default)]
pub struct Interactive;

impl Prompter for Interactive {
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        if items.is_empty() {
            return Ok(None);
        }
        let index = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(Some(index))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}

/// Answers every question negatively.
#[derive(Debug, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn select(&self, _prompt: &str, _items: &[String]) -> Result<Option<usize>> {
        Ok(None)
    }

    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Interactive prompts when attached to a terminal, otherwise none.
pub fn for_terminal() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Box::new(Interactive)
    } else {
        Box::new(NonInteractive)
    }
}
