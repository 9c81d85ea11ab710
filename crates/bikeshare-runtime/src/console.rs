//! Line-oriented console transport.
//!
//! [`Console`] is generic over its reader and writer so sessions can run
//! against stdin/stdout in the binary and in-memory buffers in tests.

use std::io::{self, BufRead, Write};

/// Outcome of reading one answer from the user.
#[derive(Debug)]
pub enum Reply {
    /// A line of input with the trailing newline removed.
    Line(String),
    /// The input could not be read (I/O failure, invalid UTF-8).
    Unreadable(io::Error),
    /// End of input. Prompts treat this as final rather than as another
    /// invalid answer: a closed stream can never supply a valid one, so
    /// the session ends instead of re-asking.
    Closed,
}

/// Prompt/response channel with the user.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Print `question` on its own line and read the answer.
    ///
    /// Write failures are returned as `Err`; read failures are reported
    /// through [`Reply`] so the caller can decide whether to retry.
    pub fn ask(&mut self, question: &str) -> io::Result<Reply> {
        writeln!(self.output, "\n{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let reply = match self.input.read_line(&mut line) {
            Ok(0) => Reply::Closed,
            Ok(_) => Reply::Line(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => Reply::Unreadable(e),
        };
        Ok(reply)
    }

    /// Consume the console, returning the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &[u8]) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).expect("utf-8 output")
    }

    #[test]
    fn test_ask_returns_lines_without_newline() {
        let mut c = console(b"chicago\r\nyes\n");
        assert!(matches!(c.ask("City?").unwrap(), Reply::Line(ref l) if l == "chicago"));
        assert!(matches!(c.ask("Again?").unwrap(), Reply::Line(ref l) if l == "yes"));
        assert!(matches!(c.ask("More?").unwrap(), Reply::Closed));
        assert_eq!(output(c), "\nCity?\n\nAgain?\n\nMore?\n");
    }

    #[test]
    fn test_ask_reports_invalid_utf8_as_unreadable() {
        let mut c = console(b"\xff\xfe\n");
        assert!(matches!(c.ask("City?").unwrap(), Reply::Unreadable(_)));
    }

    #[test]
    fn test_say_appends_newline() {
        let mut c = console(b"");
        c.say("Hello").unwrap();
        assert_eq!(output(c), "Hello\n");
    }
}
