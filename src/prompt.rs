//! Interactive prompt surface.
//!
//! One prompt at a time over a reader/writer pair; the process blocks until
//! the user answers. Commands hand the prompter real stdio, tests hand it a
//! scripted byte buffer. Whether a prompt is shown at all is decided by the
//! calling flow from prior answers, never inside this module.

use crate::{PointsmithError, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

/// Prompter over real stdin/stdout.
pub fn stdio() -> Prompter<StdinLock<'static>, Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of output through the prompt surface.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Yes/no question; empty input takes the default.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{message} ({hint}) ")?;
            self.output.flush()?;
            match self.read_line()?.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Free-text question, re-asked until `validate` accepts the answer.
    pub fn input<F>(&mut self, message: &str, mut validate: F) -> Result<String>
    where
        F: FnMut(&str) -> std::result::Result<(), String>,
    {
        loop {
            write!(self.output, "{message} ")?;
            self.output.flush()?;
            let answer = self.read_line()?;
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.say(&reason)?,
            }
        }
    }

    /// Pick exactly one choice by number; empty input takes the default.
    /// Returns the chosen index.
    pub fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize> {
        loop {
            self.say(message)?;
            for (i, choice) in choices.iter().enumerate() {
                let mark = if i == default { '>' } else { ' ' };
                writeln!(self.output, " {mark} {}) {choice}", i + 1)?;
            }
            self.output.flush()?;
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => self.say(&format!("Enter a number between 1 and {}.", choices.len()))?,
            }
        }
    }

    /// Pick any number of choices as comma-separated numbers; empty input
    /// selects nothing. Returns the chosen indices in input order, deduped.
    pub fn multi_select(&mut self, message: &str, choices: &[String]) -> Result<Vec<usize>> {
        loop {
            self.say(&format!("{message} (comma-separated numbers, empty for none)"))?;
            for (i, choice) in choices.iter().enumerate() {
                writeln!(self.output, "   {}) {choice}", i + 1)?;
            }
            self.output.flush()?;
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(Vec::new());
            }
            match parse_selection(&answer, choices.len()) {
                Some(picked) => return Ok(picked),
                None => self.say(&format!("Enter numbers between 1 and {}.", choices.len()))?,
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(PointsmithError::Prompt(
                "unexpected end of input while waiting for an answer".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }
}

fn parse_selection(answer: &str, len: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in answer.split(',') {
        match part.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => {
                if !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
            _ => return None,
        }
    }
    Some(picked)
}
