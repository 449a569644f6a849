// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Prompt input, output and the pager's confirmation reader
//!
//! The session never touches stdin/stdout directly. Everything goes through
//! a `Console`, so tests can drive a whole navigation with in-memory buffers.

use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Reads the single token that answers a `-- More --` prompt
pub trait Confirm {
    /// Return the next answer, or `None` once input is closed
    ///
    /// `lines` is the console's line input, for readers that answer by line.
    ///
    /// # Errors
    /// Returns an error if the underlying input fails
    fn read_token(&mut self, lines: &mut dyn BufRead) -> io::Result<Option<char>>;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn read_token(&mut self, lines: &mut dyn BufRead) -> io::Result<Option<char>> {
        (**self).read_token(lines)
    }
}

/// Answers with the first character of the next input line
///
/// Used when stdin is not a terminal. An empty line answers `'\n'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineConfirm;

impl Confirm for LineConfirm {
    fn read_token(&mut self, lines: &mut dyn BufRead) -> io::Result<Option<char>> {
        let mut buf = Vec::new();
        if lines.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD, which the pager treats as any other key
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim().chars().next().unwrap_or('\n')))
    }
}

/// Answers with one keystroke read in raw terminal mode
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyReader;

impl Confirm for KeyReader {
    fn read_token(&mut self, _lines: &mut dyn BufRead) -> io::Result<Option<char>> {
        terminal::enable_raw_mode()?;
        let key = read_key();
        terminal::disable_raw_mode()?;
        key
    }
}

fn read_key() -> io::Result<Option<char>> {
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        if kind != KeyEventKind::Press {
            continue;
        }

        // Raw mode swallows SIGINT, so Ctrl-C and Ctrl-D close the pager instead
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Char('c' | 'd'))
        {
            return Ok(None);
        }

        match code {
            KeyCode::Char(c) => return Ok(Some(c)),
            KeyCode::Enter => return Ok(Some('\n')),
            KeyCode::Esc => return Ok(Some('\u{1b}')),
            _ => {}
        }
    }
}

/// Line-oriented prompts plus a confirmation reader for the pager
pub struct Console<R, W, C> {
    input: R,
    output: W,
    confirm: C,
}

impl<R: BufRead, W: Write, C: Confirm> Console<R, W, C> {
    pub fn new(input: R, output: W, confirm: C) -> Self {
        Self {
            input,
            output,
            confirm,
        }
    }

    /// Print `text` and read one line without its line ending
    ///
    /// Returns `None` at end of input. A line that is not valid UTF-8 is
    /// reported and the prompt is shown again.
    ///
    /// # Errors
    /// Returns an error if writing the prompt or reading input fails
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{text}")?;
            self.output.flush()?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }

            let Ok(mut line) = String::from_utf8(buf) else {
                writeln!(self.output, "\nError: Illegal syntax. Try again.")?;
                continue;
            };
            let trimmed = line.trim_end_matches(['\r', '\n']).len();
            line.truncate(trimmed);
            return Ok(Some(line));
        }
    }

    /// Read one pagination answer through the configured `Confirm`
    ///
    /// # Errors
    /// Returns an error if the input fails
    pub fn confirm(&mut self) -> io::Result<Option<char>> {
        self.output.flush()?;
        self.confirm.read_token(&mut self.input)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }
}
