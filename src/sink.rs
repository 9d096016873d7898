//! Line-oriented output sinks.
//!
//! The reporter formats plain text lines; sinks decide where they go and how
//! they look. Tests substitute `Memory` to capture output verbatim.

use std::io;
use std::io::prelude::*;

/// A line-oriented writer.
pub trait Sink {
    /// Writes a single line, appending the line terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

lazy_static! {
    /// Colors keyed off the fixed-width verdict tag at the start of a line.
    static ref TAG_COLORS: Vec<(&'static str, term::color::Color)> = vec![
        ("[RUNNING ]", term::color::WHITE),
        ("[  OK  ]", term::color::GREEN),
        ("[ FAIL ]", term::color::RED),
        ("[SUCCESS]", term::color::GREEN),
        ("[WARNING]", term::color::YELLOW),
        ("[NOTICE]", term::color::YELLOW),
    ];
}

/// The default sink: process stdout, colorized when attached to a terminal.
pub struct Console {
    _private: (),
}

impl Console {
    pub fn new() -> Self {
        Console { _private: () }
    }

    fn color_for(line: &str) -> Option<term::color::Color> {
        TAG_COLORS.iter()
            .find(|(tag, _)| line.starts_with(tag))
            .map(|&(_, color)| color)
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new()
    }
}

impl Sink for Console {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match term::stdout().as_mut() {
            Some(terminal) => {
                // Color selection is cosmetic; a terminal that cannot
                // change color still gets the text.
                if let Some(color) = Self::color_for(line) {
                    let _ = terminal.fg(color);
                }

                writeln!(terminal, "{}", line)?;

                // 'cargo test' will reuse the last emitted color if we
                // don't reset it.
                let _ = terminal.reset();

                Ok(())
            },
            None => {
                writeln!(io::stdout(), "{}", line)
            },
        }
    }
}

/// An in-memory sink for capturing output in tests.
#[derive(Default)]
pub struct Memory {
    lines: Vec<String>,
}

impl Memory {
    pub fn new() -> Self {
        Memory { lines: Vec::new() }
    }

    /// Every line written so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

impl Sink for Memory {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_captures_lines_in_order() {
        let mut sink = Memory::new();

        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        assert_eq!(sink.lines(), &["first".to_owned(), "second".to_owned()]);
    }

    #[test]
    fn console_colors_are_keyed_off_verdict_tags() {
        assert_eq!(Console::color_for("[ FAIL ] suite.test (3 ms)"), Some(term::color::RED));
        assert_eq!(Console::color_for("[  OK  ] suite.test (3 ms)"), Some(term::color::GREEN));
        assert_eq!(Console::color_for("Total tests run: 4"), None);
    }
}
