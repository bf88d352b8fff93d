//! Line-oriented terminal prompting.
//!
//! [`Prompt`] is generic over its reader and writer so menus can be driven by
//! a scripted `Cursor` in tests and by locked stdin/stdout in the binary.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use till_core::ValidationError;

use crate::error::{CliError, CliResult};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label` (no newline) and reads one trimmed line.
    ///
    /// ## Errors
    /// `CliError::InputClosed` at end of input.
    pub fn ask(&mut self, label: &str) -> CliResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Asks for a value and parses it. Parse failures are returned as
    /// `InvalidFormat` so the caller can show them and ask again.
    pub fn ask_parsed<T: FromStr>(
        &mut self,
        label: &str,
        field: &str,
    ) -> CliResult<Result<T, ValidationError>> {
        let raw = self.ask(label)?;
        Ok(parse_field(&raw, field))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parses `raw` as `T`, naming `field` in the error.
pub fn parse_field<T: FromStr>(raw: &str, field: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a number", raw.trim()),
        })
}
