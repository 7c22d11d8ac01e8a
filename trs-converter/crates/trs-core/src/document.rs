//! Document builder: `.trs` text → [`State`].
//!
//! ```text
//! [VNAGloble]
//! m_f64StartFreq=1000000
//! m_f64StopFreq=3000000000
//! [Trace]
//! size=201
//! 1%5Bampy%5D=0.012
//! ```
//!
//! Each `[name]` header opens a section; every following `key=value`
//! line is inserted into that section through the key-path parser.

use crate::autocast::autocast;
use crate::error::ParseError;
use crate::keypath::KeyPath;
use crate::value::State;

/// Classification of a single `.trs` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Blank,
    Section(&'a str),
    Assignment { key: &'a str, value: &'a str },
}

/// Classify one line. `None` means the line is neither blank, a header
/// nor an assignment.
pub fn classify(line: &str) -> Option<Line<'_>> {
    // headers start in column one; only trailing whitespace is ignored
    let trimmed = line.trim_end();
    if trimmed.is_empty() {
        return Some(Line::Blank);
    }
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        return Some(Line::Section(&trimmed[1..trimmed.len() - 1]));
    }
    // values may contain '=' themselves, only the first one splits
    line.split_once('=')
        .map(|(key, value)| Line::Assignment { key, value })
}

/// Single-pass accumulator over the lines of one document.
///
/// The active section is built on the side and merged into the top-level
/// state when the next header arrives or the input ends.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    state: State,
    active: Option<(String, State)>,
    line: usize,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the section currently receiving assignments.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_ref().map(|(name, _)| name.as_str())
    }

    /// Feed the next line of the document.
    pub fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        self.line += 1;
        let line = self.line;

        match classify(text) {
            Some(Line::Blank) => Ok(()),
            Some(Line::Section(name)) => {
                self.close_section();
                log::debug!("line {}: section [{}]", line, name);
                // a repeated header starts the section over
                self.active = Some((name.to_string(), State::new()));
                Ok(())
            }
            Some(Line::Assignment { key, value }) => {
                let (_, section) = self.active.as_mut().ok_or_else(|| ParseError::NoSection {
                    line,
                    text: text.to_string(),
                })?;
                KeyPath::parse(key)
                    .and_then(|path| path.insert_into(section, autocast(value)))
                    .map_err(|source| ParseError::Key { line, source })
            }
            None => Err(ParseError::MissingAssignment {
                line,
                text: text.to_string(),
            }),
        }
    }

    /// Finish the document and return the populated state.
    pub fn finish(mut self) -> State {
        self.close_section();
        self.state
    }

    fn close_section(&mut self) {
        if let Some((name, section)) = self.active.take() {
            self.state.insert(name, section);
        }
    }
}

/// Parse the full content of a `.trs` file.
pub fn parse_trs(content: &str) -> Result<State, ParseError> {
    let mut builder = DocumentBuilder::new();
    for line in content.lines() {
        builder.feed(line)?;
    }
    let state = builder.finish();
    log::debug!("parsed {} section(s)", state.len());
    Ok(state)
}
