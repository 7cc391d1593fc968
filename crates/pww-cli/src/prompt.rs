//! # Terminal Prompts
//!
//! Three question shapes drive the interactive wizard:
//!
//! - **confirm**: yes/no with a default taken on an empty answer.
//! - **choose**: numbered menu, repeated until a code in range is entered.
//! - **build_list**: add one item at a time, confirming the running list.
//!
//! Input comes from any [`LineSource`]; every `BufRead` is one, so the
//! binary passes locked stdin and tests pass a `Cursor`. Mistyped answers are
//! reported and asked again. End of input is never retried: it surfaces as
//! [`PromptError::InputClosed`].

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use pww_core::CodedEnum;
use thiserror::Error;

/// Shown when an answer is not a number.
pub const INVALID_ENTRY: &str = "Invalid entry, please try again.";

/// Errors reading answers from the operator.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Reading or writing the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended while a question was pending.
    #[error("input closed before the question was answered")]
    InputClosed,
}

/// A source of answer lines.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<B: BufRead> LineSource for B {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }
}

/// Question/answer channel with the operator.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> Console<R, W> {
    /// Wrap an input source and the writer prompts are printed to.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The writer prompts and command output go to.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Split back into input and output.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.input.next_line()?.ok_or(PromptError::InputClosed)
    }

    /// Ask a yes/no question. An empty answer takes `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "yes" } else { "no" };
        loop {
            let reply = self.ask(&format!("{question} (yes/no) [{hint}]: "))?;
            match reply.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }

    /// Show `menu` until the operator enters the code of a `T`.
    ///
    /// `kind` names the value in the out-of-range message, e.g. "domain type".
    pub fn choose<T: CodedEnum>(&mut self, menu: &str, kind: &str) -> Result<T, PromptError> {
        loop {
            let reply = self.ask(menu)?;
            let Ok(code) = reply.trim().parse::<i64>() else {
                self.say(INVALID_ENTRY)?;
                continue;
            };
            match T::from_code(code) {
                Some(value) => return Ok(value),
                None => self.say(format!("Invalid {kind} entered, please try again."))?,
            }
        }
    }

    /// Extend `items` one entry at a time.
    ///
    /// Each entry is confirmed before it is added, and after every addition
    /// the operator either keeps the running list or adds another.
    pub fn build_list(
        &mut self,
        mut items: Vec<String>,
        entry_prompt: &str,
        item_label: &str,
        list_label: &str,
    ) -> Result<Vec<String>, PromptError> {
        loop {
            let entry = loop {
                let reply = self.ask(entry_prompt)?;
                let reply = reply.trim();
                if !reply.is_empty() {
                    break reply.to_string();
                }
            };
            if !self.confirm(&format!("The {item_label} is: \"{entry}\" Add this?"), true)? {
                continue;
            }
            items.push(entry);
            if self.confirm(&format!("The current {list_label} are: {items:?} Keep this?"), true)? {
                return Ok(items);
            }
        }
    }

    /// Print `notice` and wait for one line.
    pub fn pause(&mut self, notice: &str) -> Result<(), PromptError> {
        self.ask(notice).map(drop)
    }
}
