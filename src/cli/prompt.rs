// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented console input.
//!
//! Generic over the reader and writer so the whole menu can be driven from a
//! byte slice in tests.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use super::display;
use crate::error::Result;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        self.say("")
    }

    /// Print `question` and read one line, trimmed. `None` at end of input.
    pub fn read_line(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", display::prompt_text(question))?;
        self.output.flush()?;

        // Invalid UTF-8 is replaced, not fatal
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Like [`read_line`](Self::read_line) but end of input is an error.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.read_line(question)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed").into())
    }

    /// Re-ask until the answer is an integer inside `range`.
    /// `None` at end of input.
    pub fn read_integer(&mut self, question: &str, range: RangeInclusive<u32>) -> Result<Option<u32>> {
        loop {
            let Some(answer) = self.read_line(question)? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => self.say(&display::failure(&format!(
                    "Please enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )))?,
            }
        }
    }
}
